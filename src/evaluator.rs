use crate::ast::{Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::environment::Environment;
use crate::object::{Builtin, Object, BUILTINS};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// Walks a parsed program against an environment chain.
///
/// TRUE, FALSE and NULL are canonical instances created once per
/// evaluator; `==`/`!=` on non-integer operands compares by identity, so
/// every boolean produced anywhere in a program must be one of the two
/// singletons.
pub struct Evaluator<'a, W: Write> {
    output: &'a mut W,
    true_obj: Rc<Object>,
    false_obj: Rc<Object>,
    null_obj: Rc<Object>,
    builtins: HashMap<&'static str, Rc<Object>>,
}

fn new_error(message: String) -> Rc<Object> {
    Rc::new(Object::Error(message))
}

fn is_error(obj: &Rc<Object>) -> bool {
    matches!(&**obj, Object::Error(..))
}

fn is_truthy(obj: &Object) -> bool {
    !matches!(obj, Object::Null | Object::Boolean(false))
}

fn unwrap_return_value(obj: Rc<Object>) -> Rc<Object> {
    match &*obj {
        Object::ReturnValue(value) => Rc::clone(value),
        _ => obj,
    }
}

impl<'a, W: Write> Evaluator<'a, W> {
    pub fn new(output: &'a mut W) -> Self {
        let mut builtins = HashMap::new();
        for builtin in &BUILTINS {
            builtins.insert(builtin.name(), Rc::new(Object::Builtin(*builtin)));
        }
        Self {
            output,
            true_obj: Rc::new(Object::Boolean(true)),
            false_obj: Rc::new(Object::Boolean(false)),
            null_obj: Rc::new(Object::Null),
            builtins,
        }
    }
    fn bool_to_boolean(&self, value: bool) -> Rc<Object> {
        if value {
            Rc::clone(&self.true_obj)
        } else {
            Rc::clone(&self.false_obj)
        }
    }
    pub fn eval_program(
        &mut self,
        program: &Program,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let mut result = Rc::clone(&self.null_obj);
        for statement in program.statements() {
            result = self.eval_statement(statement, env);
            match &*result {
                Object::ReturnValue(value) => return Rc::clone(value),
                Object::Error(..) => return result,
                _ => {}
            }
        }
        result
    }
    fn eval_statement(&mut self, statement: &Statement, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        use Statement::*;
        match statement {
            ExpressionStatement(exp) => self.eval_expression(exp, env),
            BlockStatement(statements) => self.eval_block_statement(statements, env),
            LetStatement { name, value } => {
                let value = self.eval_expression(value, env);
                if is_error(&value) {
                    return value;
                }
                env.borrow_mut().set(name.clone(), value);
                Rc::clone(&self.null_obj)
            }
            ReturnStatement(value) => {
                let value = self.eval_expression(value, env);
                if is_error(&value) {
                    return value;
                }
                Rc::new(Object::ReturnValue(value))
            }
        }
    }
    // unlike eval_program this keeps the ReturnValue wrapper intact, so an
    // inner return escapes every surrounding block before the enclosing
    // function call unwraps it
    fn eval_block_statement(
        &mut self,
        statements: &[Statement],
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let mut result = Rc::clone(&self.null_obj);
        for statement in statements {
            result = self.eval_statement(statement, env);
            if matches!(&*result, Object::ReturnValue(..) | Object::Error(..)) {
                return result;
            }
        }
        result
    }
    fn eval_expression(&mut self, expression: &Expression, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        use Expression::*;
        match expression {
            Identifier(name) => self.eval_identifier(name, env),
            IntegerLiteral(value) => Rc::new(Object::Integer(*value)),
            StringLiteral(value) => Rc::new(Object::MonkeyString(value.clone())),
            Boolean(value) => self.bool_to_boolean(*value),
            PrefixExpression { operator, right } => {
                let right = self.eval_expression(right, env);
                if is_error(&right) {
                    return right;
                }
                self.eval_prefix_expression(*operator, right)
            }
            InfixExpression {
                left,
                operator,
                right,
            } => {
                let left = self.eval_expression(left, env);
                if is_error(&left) {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if is_error(&right) {
                    return right;
                }
                self.eval_infix_expression(*operator, left, right)
            }
            IfExpression {
                condition,
                consequence,
                alternative,
            } => self.eval_if_expression(condition, consequence, alternative.as_deref(), env),
            FunctionLiteral { parameters, body } => Rc::new(Object::Function {
                parameters: parameters.clone(),
                body: Rc::new(body.as_ref().clone()),
                env: Rc::clone(env),
            }),
            CallExpression {
                function,
                arguments,
            } => {
                let function = self.eval_expression(function, env);
                if is_error(&function) {
                    return function;
                }
                let arguments = match self.eval_expressions(arguments, env) {
                    Ok(arguments) => arguments,
                    Err(err) => return err,
                };
                self.apply_function(function, arguments)
            }
            ArrayLiteral(elements) => match self.eval_expressions(elements, env) {
                Ok(elements) => Rc::new(Object::ArrayObject(elements)),
                Err(err) => err,
            },
            HashLiteral(pairs) => self.eval_hash_literal(pairs, env),
            IndexExpression { left, index } => {
                let left = self.eval_expression(left, env);
                if is_error(&left) {
                    return left;
                }
                let index = self.eval_expression(index, env);
                if is_error(&index) {
                    return index;
                }
                self.eval_index_expression(left, index)
            }
        }
    }
    fn eval_identifier(&self, name: &str, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        if let Some(obj) = env.borrow().get(name) {
            return obj;
        }
        if let Some(builtin) = self.builtins.get(name) {
            return Rc::clone(builtin);
        }
        new_error(format!("identifier not found: {}", name))
    }
    fn eval_prefix_expression(&self, operator: PrefixOperator, right: Rc<Object>) -> Rc<Object> {
        match operator {
            PrefixOperator::BANG => self.eval_bang_operator_expression(right),
            PrefixOperator::MINUS => match &*right {
                Object::Integer(value) => Rc::new(Object::Integer(-value)),
                _ => new_error(format!("unknown operator: -{}", right.r#type())),
            },
        }
    }
    fn eval_bang_operator_expression(&self, right: Rc<Object>) -> Rc<Object> {
        match &*right {
            Object::Boolean(true) => Rc::clone(&self.false_obj),
            Object::Boolean(false) => Rc::clone(&self.true_obj),
            Object::Null => Rc::clone(&self.true_obj),
            _ => Rc::clone(&self.false_obj),
        }
    }
    fn eval_infix_expression(
        &self,
        operator: InfixOperator,
        left: Rc<Object>,
        right: Rc<Object>,
    ) -> Rc<Object> {
        use InfixOperator::*;
        use Object::*;
        match (&*left, &*right) {
            (Integer(l), Integer(r)) => self.eval_integer_infix_expression(operator, *l, *r),
            (MonkeyString(l), MonkeyString(r)) => match operator {
                PLUS => Rc::new(MonkeyString(format!("{}{}", l, r))),
                _ => new_error(format!("unknown operator: STRING {} STRING", operator)),
            },
            _ if operator == EQ && left.r#type() == right.r#type() => {
                self.bool_to_boolean(Rc::ptr_eq(&left, &right))
            }
            _ if operator == NEQ && left.r#type() == right.r#type() => {
                self.bool_to_boolean(!Rc::ptr_eq(&left, &right))
            }
            _ if left.r#type() != right.r#type() => new_error(format!(
                "type mismatch: {} {} {}",
                left.r#type(),
                operator,
                right.r#type()
            )),
            _ => new_error(format!(
                "unknown operator: {} {} {}",
                left.r#type(),
                operator,
                right.r#type()
            )),
        }
    }
    fn eval_integer_infix_expression(
        &self,
        operator: InfixOperator,
        left: i64,
        right: i64,
    ) -> Rc<Object> {
        use InfixOperator::*;
        match operator {
            PLUS => Rc::new(Object::Integer(left + right)),
            MINUS => Rc::new(Object::Integer(left - right)),
            ASTERISK => Rc::new(Object::Integer(left * right)),
            SLASH => Rc::new(Object::Integer(left / right)),
            LT => self.bool_to_boolean(left < right),
            GT => self.bool_to_boolean(left > right),
            EQ => self.bool_to_boolean(left == right),
            NEQ => self.bool_to_boolean(left != right),
        }
    }
    fn eval_if_expression(
        &mut self,
        condition: &Expression,
        consequence: &Statement,
        alternative: Option<&Statement>,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let condition = self.eval_expression(condition, env);
        if is_error(&condition) {
            return condition;
        }
        if is_truthy(&condition) {
            self.eval_statement(consequence, env)
        } else if let Some(alternative) = alternative {
            self.eval_statement(alternative, env)
        } else {
            Rc::clone(&self.null_obj)
        }
    }
    // stops at the first error and returns exactly that error
    fn eval_expressions(
        &mut self,
        expressions: &[Expression],
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Vec<Rc<Object>>, Rc<Object>> {
        let mut result = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let evaluated = self.eval_expression(expression, env);
            if is_error(&evaluated) {
                return Err(evaluated);
            }
            result.push(evaluated);
        }
        Ok(result)
    }
    fn apply_function(&mut self, function: Rc<Object>, arguments: Vec<Rc<Object>>) -> Rc<Object> {
        match &*function {
            Object::Function {
                parameters,
                body,
                env,
            } => {
                let extended = Environment::new_enclosed(Rc::clone(env));
                // extra arguments are ignored; missing ones stay unbound
                for (parameter, argument) in parameters.iter().zip(arguments) {
                    extended.borrow_mut().set(parameter.clone(), argument);
                }
                let evaluated = self.eval_statement(body, &extended);
                unwrap_return_value(evaluated)
            }
            Object::Builtin(builtin) => self.apply_builtin(*builtin, arguments),
            _ => new_error(format!("not a function: {}", function.r#type())),
        }
    }
    fn eval_index_expression(&self, left: Rc<Object>, index: Rc<Object>) -> Rc<Object> {
        match (&*left, &*index) {
            (Object::ArrayObject(elements), Object::Integer(i)) => {
                let max = elements.len() as i64 - 1;
                if *i < 0 || *i > max {
                    return Rc::clone(&self.null_obj);
                }
                Rc::clone(&elements[*i as usize])
            }
            (Object::HashObject(pairs), _) => match index.calculate_hash() {
                Ok(hash) => pairs
                    .get(&hash)
                    .map(|(_, value)| Rc::clone(value))
                    .unwrap_or_else(|| Rc::clone(&self.null_obj)),
                Err(err) => new_error(err.to_string()),
            },
            _ => new_error(format!("index operator not supported: {}", left.r#type())),
        }
    }
    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expression, Expression)],
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let mut map = HashMap::new();
        for (key_expression, value_expression) in pairs {
            let key = self.eval_expression(key_expression, env);
            if is_error(&key) {
                return key;
            }
            let hash = match key.calculate_hash() {
                Ok(hash) => hash,
                Err(err) => return new_error(err.to_string()),
            };
            let value = self.eval_expression(value_expression, env);
            if is_error(&value) {
                return value;
            }
            // an equal key later in the literal overwrites the earlier pair
            map.insert(hash, (key, value));
        }
        Rc::new(Object::HashObject(map))
    }
    fn apply_builtin(&mut self, builtin: Builtin, arguments: Vec<Rc<Object>>) -> Rc<Object> {
        use Builtin::*;
        match builtin {
            Len => {
                if arguments.len() != 1 {
                    return new_error(format!(
                        "wrong number of arguments. got={}, want=1",
                        arguments.len()
                    ));
                }
                match &*arguments[0] {
                    Object::MonkeyString(value) => Rc::new(Object::Integer(value.len() as i64)),
                    Object::ArrayObject(elements) => {
                        Rc::new(Object::Integer(elements.len() as i64))
                    }
                    obj => new_error(format!(
                        "argument to `len` not supported, got {}",
                        obj.r#type()
                    )),
                }
            }
            First => {
                if arguments.len() != 1 {
                    return new_error(format!(
                        "wrong number of arguments. got={}, want=1",
                        arguments.len()
                    ));
                }
                match &*arguments[0] {
                    Object::ArrayObject(elements) => elements
                        .first()
                        .map(Rc::clone)
                        .unwrap_or_else(|| Rc::clone(&self.null_obj)),
                    obj => new_error(format!(
                        "argument to `first` must be ARRAY, got {}",
                        obj.r#type()
                    )),
                }
            }
            Last => {
                if arguments.len() != 1 {
                    return new_error(format!(
                        "wrong number of arguments. got={}, want=1",
                        arguments.len()
                    ));
                }
                match &*arguments[0] {
                    Object::ArrayObject(elements) => elements
                        .last()
                        .map(Rc::clone)
                        .unwrap_or_else(|| Rc::clone(&self.null_obj)),
                    obj => new_error(format!(
                        "argument to `last` must be ARRAY, got {}",
                        obj.r#type()
                    )),
                }
            }
            Rest => {
                if arguments.len() != 1 {
                    return new_error(format!(
                        "wrong number of arguments. got={}, want=1",
                        arguments.len()
                    ));
                }
                match &*arguments[0] {
                    Object::ArrayObject(elements) => {
                        if elements.is_empty() {
                            Rc::clone(&self.null_obj)
                        } else {
                            Rc::new(Object::ArrayObject(elements[1..].to_vec()))
                        }
                    }
                    obj => new_error(format!(
                        "argument to `rest` must be ARRAY, got {}",
                        obj.r#type()
                    )),
                }
            }
            Push => {
                if arguments.len() != 2 {
                    return new_error(format!(
                        "wrong number of arguments. got={}, want=2",
                        arguments.len()
                    ));
                }
                match &*arguments[0] {
                    Object::ArrayObject(elements) => {
                        let mut elements = elements.clone();
                        elements.push(Rc::clone(&arguments[1]));
                        Rc::new(Object::ArrayObject(elements))
                    }
                    obj => new_error(format!(
                        "argument to `push` must be ARRAY, got {}",
                        obj.r#type()
                    )),
                }
            }
            Puts => {
                for argument in &arguments {
                    writeln!(self.output, "{}", argument).ok();
                }
                Rc::clone(&self.null_obj)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::Environment;
    use crate::evaluator::Evaluator;
    use crate::lexer::Lexer;
    use crate::object::Object;
    use crate::parser::Parser;
    use std::rc::Rc;

    fn eval_input(input: &str) -> Rc<Object> {
        let mut output: Vec<u8> = Vec::new();
        eval_with_output(input, &mut output)
    }

    fn eval_with_output(input: &str, output: &mut Vec<u8>) -> Rc<Object> {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse();
        assert!(
            parser.errors().is_empty(),
            "parser errors for {:?}: {:?}",
            input,
            parser.errors()
        );
        let mut evaluator = Evaluator::new(output);
        let env = Environment::new();
        evaluator.eval_program(&program, &env)
    }

    fn test_integer_object(expected: i64, actual: &Object) {
        match actual {
            Object::Integer(value) => {
                assert_eq!(
                    expected, *value,
                    "object has wrong value. want={}, got={}",
                    expected, value
                );
            }
            _ => {
                panic!(
                    "object is not Integer. got={} ({:?})",
                    actual.r#type(),
                    actual
                );
            }
        }
    }

    fn test_boolean_object(expected: bool, actual: &Object) {
        match actual {
            Object::Boolean(value) => {
                assert_eq!(
                    expected, *value,
                    "object has wrong value. want={}, got={}",
                    expected, value
                );
            }
            _ => {
                panic!(
                    "object is not Boolean. got={} ({:?})",
                    actual.r#type(),
                    actual
                );
            }
        }
    }

    #[test]
    fn test_eval_integer_expression() {
        let tests = vec![
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_integer_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_eval_boolean_expression() {
        let tests = vec![
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 > 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("false != true", true),
            ("(1 < 2) == true", true),
            ("(1 < 2) == false", false),
            ("(1 > 2) == true", false),
            ("(1 > 2) == false", true),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_boolean_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_bang_operator() {
        let tests = vec![
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
            ("!0", false),
            ("!\"\"", false),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_boolean_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_if_else_expressions() {
        // only null and false are falsy
        let tests = vec![
            ("if (true) { 10 }", "10"),
            ("if (false) { 10 }", "null"),
            ("if (1) { 10 }", "10"),
            ("if (0) { 1 } else { 2 }", "1"),
            ("if (1 < 2) { 10 }", "10"),
            ("if (1 > 2) { 10 }", "null"),
            ("if (1 > 2) { 10 } else { 20 }", "20"),
            ("if (1 < 2) { 10 } else { 20 }", "10"),
            ("if (if (false) {1}) {1} else {2}", "2"),
            (r#"if ("") { 1 } else { 2 }"#, "1"),
            ("if ([]) { 1 } else { 2 }", "1"),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            assert_eq!(expected, evaluated.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn test_return_statements() {
        let tests = vec![
            ("return 10;", 10),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
            ("if (10 > 1) { return 10; }", 10),
            (
                "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
                10,
            ),
            (
                "let f = fn(x) { return x; x + 10; }; f(10);",
                10,
            ),
            (
                "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
                20,
            ),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_integer_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_error_handling() {
        let tests = vec![
            ("5 + true;", "ERROR: type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "ERROR: type mismatch: INTEGER + BOOLEAN"),
            ("-true", "ERROR: unknown operator: -BOOLEAN"),
            ("true + false;", "ERROR: unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "ERROR: unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "ERROR: unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "ERROR: unknown operator: BOOLEAN + BOOLEAN",
            ),
            (r#""a" - "b""#, "ERROR: unknown operator: STRING - STRING"),
            (r#""a" == "a""#, "ERROR: unknown operator: STRING == STRING"),
            ("foobar", "ERROR: identifier not found: foobar"),
            ("5 == true", "ERROR: type mismatch: INTEGER == BOOLEAN"),
            (
                r#"{"name": "Monkey"}[fn(x){x}]"#,
                "ERROR: unusable as hash key: FUNCTION",
            ),
            ("{[1, 2]: 1}", "ERROR: unusable as hash key: ARRAY"),
            ("[1, 2][fn(x){x}];", "ERROR: index operator not supported: ARRAY"),
            ("5[0]", "ERROR: index operator not supported: INTEGER"),
            ("5(1)", "ERROR: not a function: INTEGER"),
            ("let x = foobar; x;", "ERROR: identifier not found: foobar"),
            ("[1, foobar, 3]", "ERROR: identifier not found: foobar"),
            ("len(foobar)", "ERROR: identifier not found: foobar"),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            assert_eq!(expected, evaluated.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn test_let_statements() {
        let tests = vec![
            ("let a = 5; a;", 5),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
            (
                "let a = 5; let b = a > 3; let c = a * 99; if (b) { 10 } else { 1 };",
                10,
            ),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_integer_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_function_object() {
        let evaluated = eval_input("fn(x) { x + 2; };");
        match &*evaluated {
            Object::Function {
                parameters, body, ..
            } => {
                assert_eq!(parameters, &["x".to_string()]);
                assert_eq!(body.to_string(), "(x + 2)");
            }
            obj => {
                panic!("object is not Function. got={} ({:?})", obj.r#type(), obj);
            }
        }
        assert_eq!(evaluated.to_string(), "fn(x) {\n(x + 2)\n}");
    }

    #[test]
    fn test_function_application() {
        let tests = vec![
            ("let identity = fn(x) { x; }; identity(5);", 5),
            ("let identity = fn(x) { return x; }; identity(5);", 5),
            ("let double = fn(x) { x * 2; }; double(5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
            ("fn(x) { x; }(5)", 5),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_integer_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_closures() {
        let input = "
let newAdder = fn(x) { fn(y) { x + y } };
let addTwo = newAdder(2);
addTwo(3);";
        let evaluated = eval_input(input);
        test_integer_object(5, &evaluated);
    }

    #[test]
    fn test_recursive_closure_with_nested_return() {
        let input = "
let counter = fn(x) {
    if (x > 100) {
        return true;
    } else {
        let foobar = 9999;
        counter(x + 1);
    }
};
counter(0);";
        let evaluated = eval_input(input);
        test_boolean_object(true, &evaluated);
    }

    #[test]
    fn test_missing_argument_stays_unbound() {
        let evaluated = eval_input("let add = fn(x, y) { x + y; }; add(1);");
        assert_eq!(evaluated.to_string(), "ERROR: identifier not found: y");

        let evaluated = eval_input("let one = fn(x) { x; }; one(1, 2);");
        test_integer_object(1, &evaluated);
    }

    #[test]
    fn test_string_literal() {
        let evaluated = eval_input(r#""Hello World!""#);
        assert_eq!(*evaluated, Object::MonkeyString("Hello World!".to_string()));
    }

    #[test]
    fn test_string_concatenation() {
        let evaluated = eval_input(r#""Hello" + " " + "World!";"#);
        assert_eq!(evaluated.to_string(), "Hello World!");
    }

    #[test]
    fn test_builtin_functions() {
        let tests = vec![
            (r#"len("")"#, "0"),
            (r#"len("four")"#, "4"),
            (r#"len("hello world")"#, "11"),
            ("len([1, 2, 3])", "3"),
            ("len([])", "0"),
            ("len(1)", "ERROR: argument to `len` not supported, got INTEGER"),
            (
                r#"len("one", "two")"#,
                "ERROR: wrong number of arguments. got=2, want=1",
            ),
            ("len()", "ERROR: wrong number of arguments. got=0, want=1"),
            ("first([1, 2, 3])", "1"),
            ("first([])", "null"),
            ("first(1)", "ERROR: argument to `first` must be ARRAY, got INTEGER"),
            ("last([1, 2, 3])", "3"),
            ("last([])", "null"),
            ("last(1)", "ERROR: argument to `last` must be ARRAY, got INTEGER"),
            ("rest([1, 2, 3])", "[2, 3]"),
            ("rest([1])", "[]"),
            ("rest([])", "null"),
            ("rest(1)", "ERROR: argument to `rest` must be ARRAY, got INTEGER"),
            ("push([], 1)", "[1]"),
            ("push([1, 2], 3)", "[1, 2, 3]"),
            ("push(1, 1)", "ERROR: argument to `push` must be ARRAY, got INTEGER"),
            ("push([1])", "ERROR: wrong number of arguments. got=1, want=2"),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            assert_eq!(expected, evaluated.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn test_builtins_do_not_mutate_arrays() {
        let tests = vec![
            ("let a = [1, 2, 3]; push(a, 4); a;", "[1, 2, 3]"),
            ("let a = [1, 2, 3]; rest(a); a;", "[1, 2, 3]"),
            ("let a = [1, 2, 3]; let b = push(a, 4); b;", "[1, 2, 3, 4]"),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            assert_eq!(expected, evaluated.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn test_puts_writes_inspect_forms() {
        let mut output: Vec<u8> = Vec::new();
        let evaluated = eval_with_output(r#"puts("Hello", 1 + 2, [1, "two"])"#, &mut output);
        assert_eq!(*evaluated, Object::Null);
        assert_eq!(output, b"Hello\n3\n[1, two]\n");
    }

    #[test]
    fn test_array_literals() {
        let evaluated = eval_input("[1, 2 * 2, 3 + 3]");
        assert_eq!(evaluated.to_string(), "[1, 4, 6]");
    }

    #[test]
    fn test_array_index_expressions() {
        let tests = vec![
            ("[1, 2, 3][0]", "1"),
            ("[1, 2, 3][1]", "2"),
            ("[1, 2, 3][2]", "3"),
            ("let i = 0; [1][i];", "1"),
            ("[1, 2, 3][1 + 1];", "3"),
            ("let myArray = [1, 2, 3]; myArray[2];", "3"),
            (
                "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
                "6",
            ),
            ("let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]", "2"),
            ("[1, 2, 3][3]", "null"),
            ("[1, 2, 3][-1]", "null"),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            assert_eq!(expected, evaluated.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn test_hash_literals() {
        let input = r#"let two = "two";
{
    "one": 10 - 9,
    two: 1 + 1,
    "thr" + "ee": 6 / 2,
    4: 4,
    true: 5,
    false: 6
}"#;
        let evaluated = eval_input(input);
        let pairs = match &*evaluated {
            Object::HashObject(pairs) => pairs,
            obj => panic!("object is not Hash. got={} ({:?})", obj.r#type(), obj),
        };
        let expected = vec![
            (Object::MonkeyString("one".to_string()), 1),
            (Object::MonkeyString("two".to_string()), 2),
            (Object::MonkeyString("three".to_string()), 3),
            (Object::Integer(4), 4),
            (Object::Boolean(true), 5),
            (Object::Boolean(false), 6),
        ];
        assert_eq!(pairs.len(), expected.len());
        for (key, value) in expected {
            let hash = key.calculate_hash().unwrap();
            let (stored_key, stored_value) = pairs
                .get(&hash)
                .unwrap_or_else(|| panic!("no pair for key {:?}", key));
            assert_eq!(key, **stored_key);
            test_integer_object(value, stored_value);
        }
    }

    #[test]
    fn test_hash_index_expressions() {
        let tests = vec![
            (r#"{"foo": 5}["foo"]"#, "5"),
            (r#"{"foo": 5}["bar"]"#, "null"),
            (r#"let key = "foo"; {"foo": 5}[key]"#, "5"),
            (r#"{}["foo"]"#, "null"),
            ("{5: 5}[5]", "5"),
            ("{true: 5}[true]", "5"),
            ("{false: 5}[false]", "5"),
            (
                r#"let two = "two"; {"one": 10 - 9, two: 1 + 1, "thr" + "ee": 6 / 2, 4: 4, true: 5, false: 6}[two];"#,
                "2",
            ),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            assert_eq!(expected, evaluated.to_string(), "input: {}", input);
        }
    }

    #[test]
    fn test_hash_literal_duplicate_keys_later_wins() {
        let evaluated = eval_input(r#"{"a": 1, "a": 2}["a"]"#);
        test_integer_object(2, &evaluated);
    }

    #[test]
    fn test_reference_equality_on_composites() {
        let tests = vec![
            ("[1, 2] == [1, 2]", false),
            ("let a = [1, 2]; a == a", true),
            ("let a = [1, 2]; a != a", false),
            ("let f = fn(x) { x }; f == f", true),
            ("len == len", true),
        ];
        for (input, expected) in tests {
            let evaluated = eval_input(input);
            test_boolean_object(expected, &evaluated);
        }
    }

    #[test]
    fn test_map_over_array_with_builtins() {
        let input = "
let map = fn(arr, f) {
    let iter = fn(a, acc) {
        if (len(a) == 0) {
            acc
        } else {
            iter(rest(a), push(acc, f(first(a))))
        }
    };
    iter(arr, []);
};
map([1, 2, 3, 4], fn(x) { x * 2 });";
        let evaluated = eval_input(input);
        assert_eq!(evaluated.to_string(), "[2, 4, 6, 8]");
    }

    #[test]
    fn test_printed_form_evaluates_like_the_source() {
        let tests = vec![
            "-5 * 5",
            "1 + (2 + 3) + 4",
            "!(true == true)",
            "2 / (5 + 5)",
            "[1, 2, 3, 4][1 + 2]",
            "a * [1, 2, 3, 4][b * c] * d",
        ];
        for input in tests {
            let lexer = Lexer::new(input);
            let mut parser = Parser::new(lexer);
            let program = parser.parse();
            assert!(parser.errors().is_empty());

            let direct = eval_input(input);
            let reprinted = eval_input(&program.to_string());
            assert_eq!(
                direct.to_string(),
                reprinted.to_string(),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_empty_program_evaluates_to_null() {
        let evaluated = eval_input("");
        assert_eq!(*evaluated, Object::Null);
    }
}
