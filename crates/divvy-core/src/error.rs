use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Person not found: {0}")]
    PersonNotFound(Uuid),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Expense `{expense}` references unknown person {person}")]
    DanglingReference { expense: String, person: Uuid },
    #[error("Split total {actual:.2} does not match expense amount {expected:.2}")]
    SplitMismatch { expected: f64, actual: f64 },
    #[error("Person {0} is still referenced by expenses")]
    PersonInUse(Uuid),
}

pub type CoreResult<T> = Result<T, CoreError>;
