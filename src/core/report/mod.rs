use std::fmt;
use std::io::Write;

use crate::core::verdict::{Severity, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ok => Self::Ok,
            Severity::Warning => Self::Warning,
            Severity::Critical => Self::Critical,
        }
    }
}

/// One plugin status line, plus the exit code that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
    pub message: String,
    perfdata: bool,
}

impl Report {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            perfdata: false,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Status::Ok, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Status::Critical, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Status::Unknown, message)
    }

    pub fn from_verdict(verdict: Verdict, emit_perfdata: bool) -> Self {
        Self {
            status: verdict.severity.into(),
            message: verdict.message,
            perfdata: emit_perfdata,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    pub fn print_and_exit(self) -> ! {
        let mut stdout = std::io::stdout().lock();
        // The exit code still carries the status if stdout is closed.
        let _ = writeln!(stdout, "{self}");
        let _ = stdout.flush();
        std::process::exit(self.exit_code())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.status.label(), self.message)?;
        if self.perfdata {
            write!(f, "|'RSS'={};1;2;0;2", self.status.exit_code())?;
        }
        Ok(())
    }
}
