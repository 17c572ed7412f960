//! The positional process arguments: `<socket_fd> <operation> [args...]`.

use std::ffi::OsString;
use std::fmt;
use std::os::fd::RawFd;
use std::str::FromStr;

use crate::error::CliError;

/// Operations the tool can run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    /// Archive local paths to the socket.
    Backup,
    /// Extract an archive read from the socket.
    Restore,
}

impl Operation {
    /// Returns the operation name as given on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CliError;

    /// Matches names exactly; `Backup` or `backup ` are unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backup" => Ok(Self::Backup),
            "restore" => Ok(Self::Restore),
            _ => Err(CliError::UnknownOperation { name: s.to_owned() }),
        }
    }
}

/// Parsed process arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    socket_fd: RawFd,
    operation: Operation,
    operation_args: Vec<OsString>,
}

impl Invocation {
    /// Parses the full argument vector, program name first.
    pub fn parse<I, T>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() < 3 {
            return Err(CliError::TooFewArguments { count: args.len() });
        }

        let socket_fd = parse_descriptor(&args[1])?;
        let operation = args[2].to_string_lossy().parse()?;

        Ok(Self {
            socket_fd,
            operation,
            operation_args: args[3..].to_vec(),
        })
    }

    /// Inherited socket descriptor number.
    pub const fn socket_fd(&self) -> RawFd {
        self.socket_fd
    }

    /// Requested operation.
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Arguments following the operation name.
    pub fn operation_args(&self) -> &[OsString] {
        &self.operation_args
    }
}

fn parse_descriptor(value: &OsString) -> Result<RawFd, CliError> {
    let invalid = || CliError::InvalidDescriptor {
        value: value.to_string_lossy().into_owned(),
    };
    let fd = value
        .to_str()
        .and_then(|text| text.parse::<RawFd>().ok())
        .ok_or_else(invalid)?;
    if fd < 0 {
        return Err(invalid());
    }
    Ok(fd)
}
