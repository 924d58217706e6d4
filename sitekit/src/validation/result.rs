/// Outcome of validating one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Verdict {
    /// The field passed every rule.
    #[default]
    Valid,
    /// The first failing rule's message.
    Invalid { message: String },
}

impl Verdict {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The error message, if invalid.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } => Some(message),
        }
    }
}
