#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    UnknownMacro(String),
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    MacroExists(String),
    RecursiveMacro(String),
    InvalidFormula(String),
    EvaluationError(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::UnknownMacro(name) => {
                write!(f, "Unknown macro: {}", name)
            }
            DomainError::ArityMismatch { name, expected, found } => {
                write!(f, "{} takes {} argument(s), found {}", name, expected, found)
            }
            DomainError::MacroExists(name) => {
                write!(f, "{} is already defined as a macro", name)
            }
            DomainError::RecursiveMacro(name) => {
                write!(f, "Macro {} would expand through itself", name)
            }
            DomainError::InvalidFormula(msg) => {
                write!(f, "Invalid formula: {}", msg)
            }
            DomainError::EvaluationError(msg) => {
                write!(f, "Evaluation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
