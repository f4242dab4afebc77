//! API to drive the interpreter.

use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Tree-walk interpreter over a persistent environment.
///
/// # Example
///
/// Bindings survive across `run` calls, so a REPL can feed lines one at
/// a time:
///
/// ```
/// use monkey_interpreter::interpreter::Interpreter;
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut interp = Interpreter::new(&mut output);
///
/// let adder = "let makeAdder = fn(x) { fn(y) { x + y } }; let addTwo = makeAdder(2);";
/// interp.run(adder).expect("parse error");
///
/// let value = interp.run("addTwo(40)").expect("parse error");
/// assert_eq!(value.to_string(), "42");
///
/// interp.run(r#"puts("bye")"#).expect("parse error");
/// drop(interp);
/// assert_eq!(output, b"bye\n");
/// ```
pub struct Interpreter<'a, W: Write> {
    evaluator: Evaluator<'a, W>,
    env: Rc<RefCell<Environment>>,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(output: &'a mut W) -> Self {
        Self {
            evaluator: Evaluator::new(output),
            env: Environment::new(),
        }
    }
    /// Evaluates `input` in the interpreter's environment. `Err` carries
    /// the parser's accumulated messages; runtime errors come back as an
    /// `Ok` ERROR object, since they are the program's result.
    pub fn run(&mut self, input: &str) -> Result<Rc<Object>, Vec<String>> {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse();
        if !parser.errors().is_empty() {
            return Err(parser.errors().to_vec());
        }
        Ok(self.evaluator.eval_program(&program, &self.env))
    }
}
