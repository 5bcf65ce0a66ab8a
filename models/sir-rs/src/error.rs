use std::fmt::{self, Display};

use sir_mrp::MrpError;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum SirError {
    /// A simulation parameter is outside its domain; the message names the parameter.
    InvalidParameter(String),
    MrpError(MrpError),
}

impl From<MrpError> for SirError {
    fn from(error: MrpError) -> Self {
        SirError::MrpError(error)
    }
}

impl std::error::Error for SirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SirError::InvalidParameter(_) => None,
            SirError::MrpError(e) => Some(e),
        }
    }
}

impl Display for SirError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SirError::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            SirError::MrpError(e) => write!(f, "{e}"),
        }
    }
}
