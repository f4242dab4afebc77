use crate::interpreter::Interpreter;
use std::io;
use std::io::Write;

const PROMPT: &'static str = ">> ";

pub fn start() {
    let mut output = io::stdout();
    let mut interpreter = Interpreter::new(&mut output);
    loop {
        print!("{}", PROMPT);
        io::stdout().flush().unwrap();
        let mut input = String::new();
        let read = io::stdin().read_line(&mut input).unwrap();
        if read == 0 {
            // EOF
            return;
        }
        let input = input.trim_end();
        match interpreter.run(input) {
            Ok(evaluated) => {
                println!("{}", evaluated);
            }
            Err(errors) => {
                println!("parser errors:");
                for error in errors {
                    println!("\t{}", error);
                }
            }
        }
    }
}
