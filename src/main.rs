use monkey_interpreter::interpreter::Interpreter;
use monkey_interpreter::object::Object;
use monkey_interpreter::repl;
use std::env;
use std::fs;
use std::io;
use std::process;

const MONKEY_FACE: &'static str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        run_files(&args);
        return;
    }
    let user = env::var("USER").unwrap_or_else(|_| "there".to_string());
    print!("{}", MONKEY_FACE);
    println!("Hello {}. This is the Monkey Programming Language!", user);
    println!("Start typing away");
    repl::start();
}

// every file shares one interpreter session, so later files see earlier
// bindings
fn run_files(paths: &[String]) {
    let mut output = io::stdout();
    let mut interpreter = Interpreter::new(&mut output);
    for path in paths {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("failed to read {}: {}", path, err);
                process::exit(1);
            }
        };
        match interpreter.run(&source) {
            Ok(evaluated) => {
                if let Object::Error(..) = &*evaluated {
                    eprintln!("{}", evaluated);
                    process::exit(1);
                }
            }
            Err(errors) => {
                eprintln!("parser errors:");
                for error in errors {
                    eprintln!("\t{}", error);
                }
                process::exit(1);
            }
        }
    }
}
