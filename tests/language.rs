use std::{collections::HashMap, fs, io};

use monkey::{
    interpret,
    interpreter::{
        evaluator::{core::Evaluator, module::ModuleResolver},
        lexer::Lexer,
        parser::core::Parser,
        value::environment::Environment,
    },
};
use walkdir::WalkDir;

fn eval_ok(source: &str) -> String {
    let env = Environment::new();
    match interpret(source, &env) {
        Ok(value) => value.to_string(),
        Err(error) => panic!("script failed: {error}\nsource: {source}"),
    }
}

fn eval_err(source: &str) -> String {
    let env = Environment::new();
    match interpret(source, &env) {
        Ok(value) => panic!("script yielded {value} but was expected to fail: {source}"),
        Err(error) => error.to_string(),
    }
}

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "monkey")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let env = Environment::new();
        if let Err(e) = interpret(&source, &env) {
            panic!("demo script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn integer_arithmetic() {
    assert_eq!(eval_ok("5"), "5");
    assert_eq!(eval_ok("let a = 5; let b = a * 2; b"), "10");
    assert_eq!(eval_ok("1 + 2 * 3"), "7");
    assert_eq!(eval_ok("(1 + 2) * 3"), "9");
    assert_eq!(eval_ok("20 - 2 * 5"), "10");
    assert_eq!(eval_ok("-5 + 10"), "5");
    assert_eq!(eval_ok("2 * 2 * 2 * 2"), "16");
}

#[test]
fn integer_division_yields_float() {
    assert_eq!(eval_ok("10 / 2"), "5.000000");
    assert_eq!(eval_ok("10 / 4"), "2.500000");
    assert_eq!(eval_ok("9 / 2 + 0.5"), "5.000000");
}

#[test]
fn float_arithmetic_and_mixed_widening() {
    assert_eq!(eval_ok("2.5 + 1.5"), "4.000000");
    assert_eq!(eval_ok("2.5 + 1"), "3.500000");
    assert_eq!(eval_ok("1 + 2.5"), "3.500000");
    assert_eq!(eval_ok("2 * 1.5"), "3.000000");
    assert_eq!(eval_ok("1 < 1.5"), "true");
    assert_eq!(eval_ok("2.0 == 2"), "true");
    assert_eq!(eval_ok("2.5 >= 3"), "false");
}

#[test]
fn comparison_operators() {
    assert_eq!(eval_ok("1 < 2"), "true");
    assert_eq!(eval_ok("2 > 3"), "false");
    assert_eq!(eval_ok("2 <= 2"), "true");
    assert_eq!(eval_ok("3 >= 4"), "false");
    assert_eq!(eval_ok("1 == 1"), "true");
    assert_eq!(eval_ok("1 != 1"), "false");
    assert_eq!(eval_ok("1 + 2 < 2 + 3"), "true");
    assert_eq!(eval_ok("5 < 4 != 3 < 4"), "true");
}

#[test]
fn equality_mirrors_inequality() {
    for source in ["1 == 2", "true == true", "\"a\" == \"b\"", "2.5 == 2.5"] {
        let negated = source.replace("==", "!=");
        assert_ne!(eval_ok(source), eval_ok(&negated), "{source} vs {negated}");
    }
}

#[test]
fn bang_operator_uses_truthiness() {
    assert_eq!(eval_ok("!true"), "false");
    assert_eq!(eval_ok("!false"), "true");
    assert_eq!(eval_ok("!5"), "false");
    assert_eq!(eval_ok("!0"), "false");
    assert_eq!(eval_ok("!!true"), "true");
    assert_eq!(eval_ok("!\"\""), "false");
    assert_eq!(eval_ok("!if (false) { 1 }"), "true");
}

#[test]
fn strings() {
    assert_eq!(eval_ok("\"foo\" + \"bar\""), "foobar");
    assert_eq!(eval_ok("\"a\" == \"a\""), "true");
    assert_eq!(eval_ok("\"a\" == \"b\""), "false");
    assert_eq!(eval_ok("len(\"hello\")"), "5");
    assert_eq!(eval_ok("len(\"\")"), "0");
}

#[test]
fn operator_type_errors() {
    assert_eq!(eval_err("5 + true"), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(eval_err("5 + true; 5"), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(eval_err("\"a\" - 1"), "type mismatch: STRING - INTEGER");
    assert_eq!(eval_err("-true"), "unknown operator: -BOOLEAN");
    assert_eq!(eval_err("-5.5"), "unknown operator: -FLOAT");
    assert_eq!(eval_err("true + false"), "unknown operator: BOOLEAN + BOOLEAN");
    assert_eq!(eval_err("\"a\" - \"b\""), "unknown operator: STRING - STRING");
    assert_eq!(eval_err("\"a\" < \"b\""), "unknown operator: STRING < STRING");
}

#[test]
fn equality_across_types_is_identity_not_error() {
    assert_eq!(eval_ok("true == 1"), "false");
    assert_eq!(eval_ok("true != 1"), "true");
    assert_eq!(eval_ok("\"1\" == 1"), "false");
}

#[test]
fn reference_equality_is_by_handle() {
    assert_eq!(eval_ok("[1] == [1]"), "false");
    assert_eq!(eval_ok("let a = [1]; a == a"), "true");
    assert_eq!(eval_ok("let h = {1: 2}; h == h"), "true");
    assert_eq!(eval_ok("{1: 2} == {1: 2}"), "false");
    assert_eq!(eval_ok("let f = fn() { 1 }; f == f"), "true");
    assert_eq!(eval_ok("fn() { 1 } == fn() { 1 }"), "false");
}

#[test]
fn if_expressions() {
    assert_eq!(eval_ok("if (true) { 10 }"), "10");
    assert_eq!(eval_ok("if (false) { 10 }"), "null");
    assert_eq!(eval_ok("if (1) { 10 }"), "10");
    assert_eq!(eval_ok("if (1 < 2) { 10 } else { 20 }"), "10");
    assert_eq!(eval_ok("if (1 > 2) { 10 } else { 20 }"), "20");
}

#[test]
fn while_yields_last_body_value() {
    assert_eq!(eval_ok("while (false) { 1 }"), "null");
    assert_eq!(eval_ok("let i = 0; while (i < 3) { let i = i + 1; i }"), "3");
    assert_eq!(eval_ok("let i = 0; while (i < 3) { let i = i + 1; i * 10 }"), "30");
}

#[test]
fn let_always_writes_locally() {
    // The inner `let` shadows inside the loop environment; the outer
    // binding never changes.
    assert_eq!(eval_ok("let i = 0; while (i < 3) { let i = i + 1 } i"), "0");
}

#[test]
fn return_propagates_through_while() {
    assert_eq!(eval_ok("let f = fn() { while (true) { return 7 } }; f()"), "7");
}

#[test]
fn return_statements() {
    assert_eq!(eval_ok("9; return 2 * 5; 9"), "10");
    assert_eq!(eval_ok("if (true) { if (true) { return 10 } return 1 }"), "10");
    assert_eq!(eval_ok("let f = fn() { return 1; 2 }; f()"), "1");
}

#[test]
fn functions_and_closures() {
    assert_eq!(eval_ok("let identity = fn(x) { x }; identity(5)"), "5");
    assert_eq!(eval_ok("let add = fn(a, b) { a + b }; add(1, add(2, 3))"), "6");
    assert_eq!(eval_ok("fn(x) { x * 2 }(3)"), "6");
    assert_eq!(eval_ok("let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3)"),
               "5");
    assert_eq!(eval_ok("let compose = fn(f, g) { fn(x) { g(f(x)) } }; \
                        let inc = fn(x) { x + 1 }; \
                        let double = fn(x) { x * 2 }; \
                        compose(inc, double)(5)"),
               "12");
}

#[test]
fn recursion() {
    assert_eq!(eval_ok("let f = fn(n) { if (n < 2) { return 1 } return n * f(n - 1) }; f(5)"),
               "120");
}

#[test]
fn deep_recursion_completes() {
    std::thread::Builder::new().stack_size(256 * 1024 * 1024)
                               .spawn(|| {
                                   let source = "let sum = fn(n) { if (n == 0) { return 0 } \
                                                 return n + sum(n - 1) }; sum(3000)";
                                   assert_eq!(eval_ok(source), "4501500");
                               })
                               .expect("failed to spawn test thread")
                               .join()
                               .expect("deep recursion overflowed the stack");
}

#[test]
fn user_function_arity_is_checked() {
    assert_eq!(eval_err("let f = fn(a, b) { a + b }; f(1)"),
               "wrong number of arguments. got=1, want=2");
    assert_eq!(eval_err("let f = fn() { 1 }; f(1)"),
               "wrong number of arguments. got=1, want=0");
}

#[test]
fn arrays() {
    assert_eq!(eval_ok("[1, 2 * 2, 3 + 3]"), "[1, 4, 6]");
    assert_eq!(eval_ok("let xs = [1, 2, 3]; xs[0] + xs[1] + xs[2]"), "6");
    assert_eq!(eval_ok("[1, 2, 3][1 + 1]"), "3");
}

#[test]
fn array_index_out_of_range_is_null() {
    assert_eq!(eval_ok("[1, 2, 3][3]"), "null");
    assert_eq!(eval_ok("[1, 2, 3][-1]"), "null");
    assert_eq!(eval_ok("[][0]"), "null");
}

#[test]
fn array_builtins() {
    assert_eq!(eval_ok("let xs = [1, 2, 3]; push(rest(xs), 99)"), "[2, 3, 99]");
    assert_eq!(eval_ok("len([1, 2, 3])"), "3");
    assert_eq!(eval_ok("first([7, 8])"), "7");
    assert_eq!(eval_ok("last([7, 8])"), "8");
    assert_eq!(eval_ok("first([])"), "null");
    assert_eq!(eval_ok("last([])"), "null");
    assert_eq!(eval_ok("rest([])"), "null");
    assert_eq!(eval_ok("rest([1])"), "[]");
    // push copies; the original array is untouched.
    assert_eq!(eval_ok("let xs = [1]; push(xs, 2); xs"), "[1]");
}

#[test]
fn builtin_argument_errors() {
    assert_eq!(eval_err("len(1)"), "argument to `len` not supported, got INTEGER");
    assert_eq!(eval_err("len()"), "wrong number of arguments. got=0, want=1");
    assert_eq!(eval_err("len([1], [2])"), "wrong number of arguments. got=2, want=1");
    assert_eq!(eval_err("first(1)"), "argument 1 to `first` must be ARRAY, got INTEGER");
    assert_eq!(eval_err("push(1, 1)"), "argument 1 to `push` must be ARRAY, got INTEGER");
    assert_eq!(eval_err("hasattr(1, \"x\")"),
               "argument 1 to `hasattr` must be CLASS_INSTANCE, got INTEGER");
}

#[test]
fn builtins_are_not_shadowable() {
    assert_eq!(eval_ok("let len = fn(x) { 0 }; len([1, 2, 3])"), "3");
    assert_eq!(eval_ok("let puts = 1; puts"), "builtin function");
}

#[test]
fn str_builtin() {
    assert_eq!(eval_ok("str(5)"), "5");
    assert_eq!(eval_ok("str(2.5)"), "2.500000");
    assert_eq!(eval_ok("str([1, 2]) + \"!\""), "[1, 2]!");
    assert_eq!(eval_ok("len(str(true))"), "4");
}

#[test]
fn puts_returns_null() {
    assert_eq!(eval_ok("puts(\"hello\", 5)"), "null");
}

#[test]
fn env_builtin_returns_null() {
    assert_eq!(eval_ok("class A() { let x = 1 } env(A)"), "null");
    assert_eq!(eval_ok("class A() {} env(A())"), "null");
    assert_eq!(eval_ok("env(5)"), "null");
    assert_eq!(eval_err("env()"), "wrong number of arguments. got=0, want=1");
}

#[test]
fn hashes() {
    assert_eq!(eval_ok("let h = {\"a\": 1, 2: \"b\"}; h[\"a\"] + len(h[2])"), "2");
    assert_eq!(eval_ok("{1: \"one\"}[1]"), "one");
    assert_eq!(eval_ok("{true: \"yes\", false: \"no\"}[1 < 2]"), "yes");
    assert_eq!(eval_ok("{\"k\": 5}[\"missing\"]"), "null");
}

#[test]
fn hash_keys_do_not_collide_across_types() {
    // Integer 1, boolean true and string "1" all carry distinct key tags.
    assert_eq!(eval_ok("let h = {1: \"int\", true: \"bool\", \"1\": \"str\"}; h[1]"), "int");
    assert_eq!(eval_ok("let h = {1: \"int\", true: \"bool\", \"1\": \"str\"}; h[true]"), "bool");
    assert_eq!(eval_ok("let h = {1: \"int\", true: \"bool\", \"1\": \"str\"}; h[\"1\"]"), "str");
}

#[test]
fn hash_printing_preserves_insertion_order() {
    assert_eq!(eval_ok("{\"b\": 2, \"a\": 1, 3: true}"), "{b: 2, a: 1, 3: true}");
    assert_eq!(eval_ok("str({\"b\": 2, \"a\": 1})"), "{b: 2, a: 1}");
}

#[test]
fn unusable_hash_keys() {
    assert_eq!(eval_err("{[1]: 2}"), "unusable as a hash key: ARRAY");
    assert_eq!(eval_err("{fn(x) { x }: 2}"), "unusable as a hash key: FUNCTION");
    assert_eq!(eval_err("{\"a\": 1}[[1]]"), "unusable as a hash key: ARRAY");
}

#[test]
fn index_errors() {
    assert_eq!(eval_err("5[0]"), "index operator not supported: INTEGER");
    assert_eq!(eval_err("\"abc\"[0]"), "index operator not supported: STRING");
    assert_eq!(eval_err("[1, 2][\"a\"]"), "index operator not supported: ARRAY");
}

#[test]
fn name_and_call_errors() {
    assert_eq!(eval_err("foobar"), "identifier not found: foobar");
    assert_eq!(eval_err("5(1)"), "not a function: INTEGER");
    assert_eq!(eval_err("let x = true; x()"), "not a function: BOOLEAN");
}

#[test]
fn classes_construct_instances() {
    assert_eq!(eval_ok("class A() { let __New__ = fn() { let self.x = 7 } } let a = A(); a.x"),
               "7");
    assert_eq!(eval_ok("class A() {} A()"), "<Instance of Class A>");
    assert_eq!(eval_ok("class A() {} A"), "class A");
}

#[test]
fn constructor_takes_arguments() {
    let source = "class Point() { \
                      let __New__ = fn(x, y) { let self.x = x; let self.y = y } \
                  } \
                  let p = Point(3, 4); p.x * p.y";
    assert_eq!(eval_ok(source), "12");
}

#[test]
fn methods_bind_self() {
    let source = "class Counter() { \
                      let __New__ = fn() { let self.count = 10 } \
                      let double = fn() { return self.count * 2 } \
                  } \
                  let c = Counter(); c.double()";
    assert_eq!(eval_ok(source), "20");
}

#[test]
fn methods_do_not_see_siblings_directly() {
    let source = "class A() { \
                      let secret = fn() { return 1 } \
                      let reveal = fn() { return secret() } \
                  } \
                  let a = A(); a.reveal()";
    assert_eq!(eval_err(source), "identifier not found: secret");

    let through_self = "class A() { \
                            let secret = fn() { return 1 } \
                            let reveal = fn() { return self.secret() } \
                        } \
                        let a = A(); a.reveal()";
    assert_eq!(eval_ok(through_self), "1");
}

#[test]
fn methods_see_lexical_globals() {
    let source = "let bonus = 5; \
                  class A() { let total = fn() { return bonus + 1 } } \
                  let a = A(); a.total()";
    assert_eq!(eval_ok(source), "6");
}

#[test]
fn first_parent_wins_inheritance() {
    let source = "class A() { let value = fn() { return 1 } } \
                  class B() { let value = fn() { return 2 } } \
                  class C(A, B) {} \
                  let c = C(); c.value()";
    assert_eq!(eval_ok(source), "1");

    let reversed = "class A() { let value = fn() { return 1 } } \
                    class B() { let value = fn() { return 2 } } \
                    class C(B, A) {} \
                    let c = C(); c.value()";
    assert_eq!(eval_ok(reversed), "2");
}

#[test]
fn inherited_constructor_runs() {
    let source = "class Base() { let __New__ = fn() { let self.kind = \"base\" } } \
                  class Derived(Base) {} \
                  let d = Derived(); d.kind";
    assert_eq!(eval_ok(source), "base");
}

#[test]
fn parents_must_be_classes() {
    assert_eq!(eval_err("let A = 5; class B(A) {} B"),
               "parent to be inherited from must be a class, got INTEGER");
    assert_eq!(eval_err("class B(Missing) {} B"), "identifier not found: Missing");
}

#[test]
fn dotted_let_mutates_existing_properties() {
    let source = "class P() { let __New__ = fn() { let self.x = 1 } } \
                  let p = P(); \
                  let p.x = 5; \
                  p.x";
    assert_eq!(eval_ok(source), "5");
}

#[test]
fn dotted_let_cannot_create_properties() {
    let source = "class P() { let __New__ = fn() { let self.x = 1 } } \
                  let p = P(); \
                  let p.y = 3";
    assert_eq!(eval_err(source), "y is not an instance variable of <Instance of Class P>");
}

#[test]
fn dotted_let_requires_an_instance() {
    assert_eq!(eval_err("let a = 5; let a.b = 1"),
               "dot assignment allowed only on class instances, got INTEGER");
    assert_eq!(eval_err("let a.b = 1"), "identifier not found: a");
}

#[test]
fn setattr_and_hasattr() {
    let source = "class P() { let __New__ = fn() { let self.x = 1 } } \
                  let p = P(); \
                  hasattr(p, \"x\")";
    assert_eq!(eval_ok(source), "true");

    let missing = "class P() {} let p = P(); hasattr(p, \"x\")";
    assert_eq!(eval_ok(missing), "false");

    let created = "class P() {} let p = P(); setattr(p, \"x\", 41); p.x + 1";
    assert_eq!(eval_ok(created), "42");
}

#[test]
fn instances_share_the_class_environment() {
    let source = "class A() { let __New__ = fn() { let self.n = 1 } } \
                  let a = A(); \
                  let b = A(); \
                  setattr(a, \"n\", 5); \
                  b.n";
    assert_eq!(eval_ok(source), "5");
}

#[test]
fn dot_on_plain_values_fails() {
    assert_eq!(eval_err("let x = 5; x.y"), "dot operation not supported: INTEGER");
    assert_eq!(eval_err("class A() {} let a = A(); a.missing"),
               "identifier not found: missing");
}

struct MapResolver(HashMap<String, String>);

impl ModuleResolver for MapResolver {
    fn load(&self, name: &str) -> io::Result<String> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such module"))
    }
}

fn eval_with_modules(source: &str, modules: &[(&str, &str)]) -> Result<String, String> {
    let table = modules.iter()
                       .map(|(name, text)| ((*name).to_string(), (*text).to_string()))
                       .collect();
    let evaluator = Evaluator::with_resolver(Box::new(MapResolver(table)));

    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "parse errors in {source}");

    let env = Environment::new();
    evaluator.eval_program(&program, &env)
             .map(|value| value.to_string())
             .map_err(|error| error.to_string())
}

#[test]
fn import_binds_a_module() {
    let modules = [("math", "let double = fn(x) { x * 2 }; let zero = 0;")];
    assert_eq!(eval_with_modules("import \"math\"; math.double(4)", &modules),
               Ok("8".to_string()));
    assert_eq!(eval_with_modules("import \"math\"; math.zero", &modules), Ok("0".to_string()));
    assert_eq!(eval_with_modules("import \"math\"", &modules), Ok("module math".to_string()));
}

#[test]
fn import_alias_renames_the_binding() {
    let modules = [("some/long/path", "let answer = 42;")];
    assert_eq!(eval_with_modules("import \"some/long/path\" as \"lib\"; lib.answer", &modules),
               Ok("42".to_string()));
}

#[test]
fn module_bindings_do_not_leak() {
    let modules = [("math", "let double = fn(x) { x * 2 };")];
    assert_eq!(eval_with_modules("import \"math\"; double(2)", &modules),
               Err("identifier not found: double".to_string()));
}

#[test]
fn module_functions_have_no_self() {
    let modules = [("m", "let who = fn() { return self };")];
    assert_eq!(eval_with_modules("import \"m\"; m.who()", &modules),
               Err("identifier not found: self".to_string()));
}

#[test]
fn missing_module_is_an_error() {
    let result = eval_with_modules("import \"nope\"", &[]);
    assert_eq!(result, Err("could not load module \"nope\": no such module".to_string()));
}

#[test]
fn module_parse_errors_surface() {
    let modules = [("broken", "let = 5")];
    let error = eval_with_modules("import \"broken\"", &modules).unwrap_err();
    assert!(error.starts_with("parse errors in module \"broken\":"), "{error}");
}

#[test]
fn import_from_the_filesystem() {
    // The default resolver reads `<name>.monkey` relative to the working
    // directory, which for tests is the crate root.
    assert_eq!(eval_ok("import \"demos/geometry\" as \"geo\"; geo.area(6, 7)"), "42");
    assert_eq!(eval_ok("import \"demos/geometry\"; let g = 1; g"), "1");
}

#[test]
fn evaluation_is_deterministic() {
    let source = "let h = {\"a\": 1, 2: true}; \
                  let f = fn(x) { x * 2 }; \
                  str(h) + str(f(21))";
    assert_eq!(eval_ok(source), eval_ok(source));
}
