use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct Program {
    pub(crate) statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    LetStatement { name: String, value: Expression },
    ReturnStatement(Expression),
    ExpressionStatement(Expression),
    BlockStatement(Vec<Statement>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    StringLiteral(String),
    Boolean(bool),
    ArrayLiteral(Vec<Expression>),
    // pairs keep their source order so evaluation visits each exactly once
    HashLiteral(Vec<(Expression, Expression)>),
    PrefixExpression {
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    InfixExpression {
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    IfExpression {
        condition: Box<Expression>,
        consequence: Box<Statement>,
        alternative: Option<Box<Statement>>,
    },
    FunctionLiteral {
        parameters: Vec<String>,
        body: Box<Statement>,
    },
    CallExpression {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    IndexExpression {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InfixOperator {
    PLUS,
    MINUS,
    ASTERISK,
    SLASH,
    LT,
    GT,
    EQ,
    NEQ,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PrefixOperator {
    MINUS,
    BANG,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            LetStatement { name, value } => {
                write!(f, "let {} = {};", name, value)
            }
            ReturnStatement(value) => {
                write!(f, "return {};", value)
            }
            ExpressionStatement(exp) => {
                write!(f, "{}", exp)
            }
            BlockStatement(statements) => {
                for stmt in statements {
                    write!(f, "{}", stmt)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(name) => {
                write!(f, "{}", name)
            }
            IntegerLiteral(value) => {
                write!(f, "{}", value)
            }
            StringLiteral(value) => {
                write!(f, "{}", value)
            }
            Boolean(value) => {
                write!(f, "{}", value)
            }
            ArrayLiteral(elements) => {
                write!(f, "[{}]", join(elements))
            }
            HashLiteral(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            PrefixExpression { operator, right } => {
                write!(f, "({}{})", operator, right)
            }
            InfixExpression {
                left,
                operator,
                right,
            } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            IfExpression {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            FunctionLiteral { parameters, body } => {
                write!(f, "fn({}){}", parameters.join(", "), body)
            }
            CallExpression {
                function,
                arguments,
            } => {
                write!(f, "{}({})", function, join(arguments))
            }
            IndexExpression { left, index } => {
                write!(f, "({}[{}])", left, index)
            }
        }
    }
}

fn join(expressions: &[Expression]) -> String {
    let expressions: Vec<String> = expressions.iter().map(|e| e.to_string()).collect();
    expressions.join(", ")
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use PrefixOperator::*;
        match self {
            MINUS => {
                write!(f, "-")
            }
            BANG => {
                write!(f, "!")
            }
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use InfixOperator::*;
        match self {
            PLUS => {
                write!(f, "+")
            }
            MINUS => {
                write!(f, "-")
            }
            ASTERISK => {
                write!(f, "*")
            }
            SLASH => {
                write!(f, "/")
            }
            LT => {
                write!(f, "<")
            }
            GT => {
                write!(f, ">")
            }
            EQ => {
                write!(f, "==")
            }
            NEQ => {
                write!(f, "!=")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, Program, Statement};

    #[test]
    fn test_string() {
        let program = Program::new(vec![Statement::LetStatement {
            name: "myVar".to_string(),
            value: Expression::Identifier("anotherVar".to_string()),
        }]);
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_statement_strings() {
        let tests = vec![
            (
                Statement::ReturnStatement(Expression::IntegerLiteral(5)),
                "return 5;",
            ),
            (
                Statement::ExpressionStatement(Expression::IndexExpression {
                    left: Box::new(Expression::Identifier("a".to_string())),
                    index: Box::new(Expression::IntegerLiteral(0)),
                }),
                "(a[0])",
            ),
            (
                Statement::ExpressionStatement(Expression::FunctionLiteral {
                    parameters: vec!["x".to_string(), "y".to_string()],
                    body: Box::new(Statement::BlockStatement(vec![
                        Statement::ExpressionStatement(Expression::Identifier("x".to_string())),
                    ])),
                }),
                "fn(x, y)x",
            ),
        ];
        for (stmt, expected) in tests {
            assert_eq!(stmt.to_string(), expected);
        }
    }
}
