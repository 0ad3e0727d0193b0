use pretty_assertions::assert_eq;
use structtag_core::{
    process, rewrite_source, AppError, Case, Mode, RewritePolicy, SourceFile, StructRewriter,
    Verbatim,
};

const NO_TAGS: &str = "package test

type TestStruct struct {
\tInt             int
\tInt64           int64
\tIntSlice        []int
\tInt64Slice      []int64
\tString          string
\tStringSlice     []string
\tFloat           float64
\tFloatSlice      []float64
\tUIntPointer     uintptr
\tRune            rune
\tRuneSlice       []rune
\tByte            byte
\tByteSlice       []byte
\tMapStringString map[string]string
\tMapStringInt    map[string]int
\tMapIntString    map[int]string
}
";

const SNAKE_TAGS: &str = "package test

type TestStruct struct {
\tInt             int               `json:\"int\"`
\tInt64           int64             `json:\"int_64\"`
\tIntSlice        []int             `json:\"int_slice\"`
\tInt64Slice      []int64           `json:\"int_64_slice\"`
\tString          string            `json:\"string\"`
\tStringSlice     []string          `json:\"string_slice\"`
\tFloat           float64           `json:\"float\"`
\tFloatSlice      []float64         `json:\"float_slice\"`
\tUIntPointer     uintptr           `json:\"u_int_pointer\"`
\tRune            rune              `json:\"rune\"`
\tRuneSlice       []rune            `json:\"rune_slice\"`
\tByte            byte              `json:\"byte\"`
\tByteSlice       []byte            `json:\"byte_slice\"`
\tMapStringString map[string]string `json:\"map_string_string\"`
\tMapStringInt    map[string]int    `json:\"map_string_int\"`
\tMapIntString    map[int]string    `json:\"map_int_string\"`
}
";

const CAMEL_TAGS: &str = "package test

type TestStruct struct {
\tInt             int               `json:\"Int\"`
\tInt64           int64             `json:\"Int64\"`
\tIntSlice        []int             `json:\"IntSlice\"`
\tInt64Slice      []int64           `json:\"Int64Slice\"`
\tString          string            `json:\"String\"`
\tStringSlice     []string          `json:\"StringSlice\"`
\tFloat           float64           `json:\"Float\"`
\tFloatSlice      []float64         `json:\"FloatSlice\"`
\tUIntPointer     uintptr           `json:\"UIntPointer\"`
\tRune            rune              `json:\"Rune\"`
\tRuneSlice       []rune            `json:\"RuneSlice\"`
\tByte            byte              `json:\"Byte\"`
\tByteSlice       []byte            `json:\"ByteSlice\"`
\tMapStringString map[string]string `json:\"MapStringString\"`
\tMapStringInt    map[string]int    `json:\"MapStringInt\"`
\tMapIntString    map[int]string    `json:\"MapIntString\"`
}
";

fn run(src: &str, policy: &RewritePolicy) -> String {
    rewrite_source(src, "test.go", policy).unwrap()
}

#[test]
fn test_snake_tags_added_and_aligned() {
    assert_eq!(run(NO_TAGS, &RewritePolicy::default()), SNAKE_TAGS);
}

#[test]
fn test_camel_tags_added_and_aligned() {
    let policy = RewritePolicy::default().with_case(Case::Camel);
    assert_eq!(run(NO_TAGS, &policy), CAMEL_TAGS);
}

#[test]
fn test_skip_existing_leaves_other_convention_alone() {
    assert_eq!(run(CAMEL_TAGS, &RewritePolicy::default()), CAMEL_TAGS);
}

#[test]
fn test_overwrite_switches_convention() {
    let to_snake = RewritePolicy::default().with_mode(Mode::Overwrite);
    assert_eq!(run(CAMEL_TAGS, &to_snake), SNAKE_TAGS);

    let to_camel = to_snake.with_case(Case::Camel);
    assert_eq!(run(SNAKE_TAGS, &to_camel), CAMEL_TAGS);
}

#[test]
fn test_overwrite_is_noop_on_matching_tags() {
    let policy = RewritePolicy::default().with_mode(Mode::Overwrite);
    assert_eq!(run(SNAKE_TAGS, &policy), SNAKE_TAGS);
}

#[test]
fn test_skip_existing_is_a_fixed_point() {
    let policy = RewritePolicy::default();
    let inputs = [
        NO_TAGS,
        "package p\n\ntype A struct {\n\tX int `xml:\"x\"`\n\ty int\n\tZ struct {\n\t\tW string\n\t}\n}\n",
    ];
    for input in inputs {
        let once = run(input, &policy);
        assert_eq!(run(&once, &policy), once);
    }
}

#[test]
fn test_single_line_struct() {
    let out = run("package p\n\ntype T struct { Field string }\n", &RewritePolicy::default());
    assert_eq!(out, "package p\n\ntype T struct { Field string `json:\"field\"` }\n");
}

#[test]
fn test_append_new_key_first() {
    let src = "package test\n\ntype TestStruct struct {\n\tField string `json:\"field\"`\n}\n";
    let policy = RewritePolicy::for_tag("msgpack").with_mode(Mode::Append);
    assert_eq!(
        run(src, &policy),
        "package test\n\ntype TestStruct struct {\n\tField string `msgpack:\"field\" json:\"field\"`\n}\n"
    );
}

#[test]
fn test_overwrite_drops_other_keys() {
    let src = "package p\n\ntype T struct {\n\tField string `xml:\"f\" json:\"F\"`\n}\n";
    let policy = RewritePolicy::default().with_mode(Mode::Overwrite);
    assert_eq!(
        run(src, &policy),
        "package p\n\ntype T struct {\n\tField string `json:\"field\"`\n}\n"
    );
}

#[test]
fn test_ignored_field_gets_dash() {
    let src = "package test\n\ntype TestStruct struct {\n\tField string\n}\n";
    let policy = RewritePolicy::default().ignore_fields(["Field"]);
    assert_eq!(
        run(src, &policy),
        "package test\n\ntype TestStruct struct {\n\tField string `json:\"-\"`\n}\n"
    );
}

#[test]
fn test_ignored_type_is_untouched() {
    let src = "package test\n\ntype TestStruct struct {\n\tField string\n}\n\ntype Other struct {\n\tField string\n}\n";
    let policy = RewritePolicy::default().ignore_types(["TestStruct"]);
    let out = run(src, &policy);
    assert!(out.starts_with("package test\n\ntype TestStruct struct {\n\tField string\n}\n"));
    assert!(out.ends_with("type Other struct {\n\tField string `json:\"field\"`\n}\n"));
}

#[test]
fn test_case_none_keeps_identifier() {
    let policy = RewritePolicy::default().with_case(Case::None);
    let out = run("package p\n\ntype T struct {\n\tUserName string\n}\n", &policy);
    assert!(out.contains("UserName string `json:\"UserName\"`"));
}

#[test]
fn test_unexported_fields_untouched() {
    let src = "package etc\n\ntype TestUnexported struct {\n\ttestUnexportedInt int\n\tTestExportedInt   int\n}\n";
    let out = run(src, &RewritePolicy::default());
    assert_eq!(
        out,
        "package etc\n\ntype TestUnexported struct {\n\ttestUnexportedInt int\n\tTestExportedInt   int `json:\"test_exported_int\"`\n}\n"
    );
}

#[test]
fn test_functions_and_methods_are_kept() {
    let src = "package p\n\nimport \"fmt\"\n\ntype T struct {\n\tA int\n}\n\nfunc (t T) String() string {\n\ttype local struct {\n\t\tB int\n\t}\n\treturn fmt.Sprint(t.A, local{})\n}\n";
    let out = run(src, &RewritePolicy::default());
    assert!(out.contains("\tA int `json:\"a\"`\n"));
    assert!(out.contains("\t\tB int `json:\"b\"`\n"));
    assert!(out.contains("return fmt.Sprint(t.A, local{})"));
}

#[test]
fn test_parse_error_returns_nothing() {
    let err = rewrite_source("package p\n\ntype T struct {\n\tA int\n", "broken.go", &RewritePolicy::default())
        .unwrap_err();
    assert!(matches!(err, AppError::Parse { ref unit, .. } if unit == "broken.go"));
}

#[test]
fn test_verbatim_formatter_keeps_spacing() {
    let src = "package p\n\ntype T struct {\n\tA    int\n\tLong int\n}\n";
    let policy = RewritePolicy::default();
    let out = StructRewriter::new(&policy)
        .with_formatter(&Verbatim)
        .rewrite(src, "t.go")
        .unwrap();
    assert_eq!(
        out.source,
        "package p\n\ntype T struct {\n\tA    int `json:\"a\"`\n\tLong int `json:\"long\"`\n}\n"
    );
    assert_eq!(out.edits, 2);
}

#[test]
fn test_independent_policies_across_threads() {
    let src = "package p\n\ntype T struct {\n\tUserName string\n}\n";
    let snake = RewritePolicy::default();
    let camel = RewritePolicy::for_tag("yaml").with_case(Case::Camel);

    std::thread::scope(|s| {
        let a = s.spawn(|| run(src, &snake));
        let b = s.spawn(|| run(src, &camel));
        assert!(a.join().unwrap().contains("`json:\"user_name\"`"));
        assert!(b.join().unwrap().contains("`yaml:\"UserName\"`"));
    });
}

#[test]
fn test_process_batch() {
    let files = vec![
        SourceFile::new("none.go", NO_TAGS),
        SourceFile::new("snake.go", SNAKE_TAGS),
        SourceFile::new("camel.go", CAMEL_TAGS),
    ];
    let (results, err) = process(&files, &RewritePolicy::default());
    assert!(err.is_none());
    assert_eq!(results[0].data, SNAKE_TAGS);
    assert_eq!(results[1].data, SNAKE_TAGS);
    assert_eq!(results[2].data, CAMEL_TAGS);
}
