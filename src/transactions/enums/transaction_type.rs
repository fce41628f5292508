#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn value(&self) -> &str {
        match *self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}
