use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum SimulationError {
    ReadConfig(String, io::Error),
    ParseConfig(serde_json::Error),
    DuplicateObject(String),
    UnknownKind(String),
    UnknownObject(String),
    UnknownHandler(String),
    UnknownMethod { kind: String, method: String },
    MissingTarget(String),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::ReadConfig(path, err) => write!(f, "read config file {} failed: {}", path, err),
            SimulationError::ParseConfig(err) => write!(f, "invalid config: {}", err),
            SimulationError::DuplicateObject(name) => write!(f, "object {} declared twice", name),
            SimulationError::UnknownKind(kind) => write!(f, "unknown object kind: {}", kind),
            SimulationError::UnknownObject(name) => write!(f, "unknown object: {}", name),
            SimulationError::UnknownHandler(name) => write!(f, "unknown handler: {}", name),
            SimulationError::UnknownMethod { kind, method } => write!(f, "{} has no method {}", kind, method),
            SimulationError::MissingTarget(event) => {
                write!(f, "step on {} needs a handler or an object and method", event)
            }
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulationError::ReadConfig(_, err) => Some(err),
            SimulationError::ParseConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::ParseConfig(err)
    }
}
