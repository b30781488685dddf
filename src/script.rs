/*!
 * Pool Scripts
 * Line-oriented command language driving one pool
 *
 * One command per line, `#` starts a comment:
 *
 * ```text
 * init
 * insert 50        # -> handle
 * add 1
 * drop 1
 * retrieve 1
 * dump
 * stats
 * snapshot
 * teardown
 * ```
 */

use crate::config::PoolConfig;
use crate::core::types::{RawHandle, RefCount, Size};
use crate::pool::{DropOutcome, Handle, ObjectPool, PoolResult, PoolStats};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Script parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    #[diagnostic(
        code(script::unknown_command),
        help("Commands: init, teardown, insert, retrieve, add, drop, dump, stats, snapshot")
    )]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` expects {expected}")]
    #[diagnostic(code(script::bad_arguments))]
    BadArguments {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: `{value}` is not a valid number")]
    #[diagnostic(code(script::invalid_number))]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: handle 0 is the null handle")]
    #[diagnostic(
        code(script::null_handle),
        help("Handles start at 1; 0 never names an object.")
    )]
    NullHandle { line: usize },
}

/// One pool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Init,
    Teardown,
    Insert(Size),
    Retrieve(Handle),
    AddReference(Handle),
    DropReference(Handle),
    Dump,
    Stats,
    Snapshot,
}

impl Command {
    /// Parse one line; `Ok(None)` for blank lines and comments
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Self>, ScriptError> {
        let code = line.split('#').next().unwrap_or("").trim();
        let mut words = code.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let bad_args = |expected| ScriptError::BadArguments {
            line: line_no,
            command: name.to_string(),
            expected,
        };
        let no_args = |command: Command| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(bad_args("no arguments"))
            }
        };
        let one_number = || match args.as_slice() {
            [value] => value.parse::<u64>().map_err(|_| ScriptError::InvalidNumber {
                line: line_no,
                value: value.to_string(),
            }),
            _ => Err(bad_args("exactly one number")),
        };
        let one_handle = || {
            let raw: RawHandle = one_number()?;
            Handle::from_raw(raw).ok_or(ScriptError::NullHandle { line: line_no })
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "init" | "initialize" => no_args(Command::Init)?,
            "teardown" | "destroy" => no_args(Command::Teardown)?,
            "dump" => no_args(Command::Dump)?,
            "stats" => no_args(Command::Stats)?,
            "snapshot" => no_args(Command::Snapshot)?,
            "insert" => {
                let size = one_number()?;
                let size = Size::try_from(size).map_err(|_| ScriptError::InvalidNumber {
                    line: line_no,
                    value: size.to_string(),
                })?;
                Command::Insert(size)
            }
            "retrieve" | "get" => Command::Retrieve(one_handle()?),
            "add" | "addref" => Command::AddReference(one_handle()?),
            "drop" | "dropref" => Command::DropReference(one_handle()?),
            _ => {
                return Err(ScriptError::UnknownCommand {
                    line: line_no,
                    command: name.to_string(),
                })
            }
        };
        Ok(Some(command))
    }
}

/// Parse a whole script, numbering lines from 1
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if let Some(command) = Command::parse(i + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// What one command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Initialized,
    TornDown,
    Inserted {
        size: Size,
        handle: Option<Handle>,
    },
    Retrieved {
        handle: Handle,
        len: Option<Size>,
    },
    Referenced {
        handle: Handle,
        count: Option<RefCount>,
    },
    Dropped {
        handle: Handle,
        outcome: DropOutcome,
    },
    Dump(String),
    Stats(PoolStats),
    Snapshot(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Initialized => write!(f, "initialized"),
            Outcome::TornDown => write!(f, "torn down"),
            Outcome::Inserted {
                size,
                handle: Some(handle),
            } => write!(f, "insert {} -> handle {}", size, handle),
            Outcome::Inserted { size, handle: None } => {
                write!(f, "insert {} -> null handle (pool full)", size)
            }
            Outcome::Retrieved {
                handle,
                len: Some(len),
            } => write!(f, "retrieve {} -> {} bytes", handle, len),
            Outcome::Retrieved { handle, len: None } => {
                write!(f, "retrieve {} -> not found", handle)
            }
            Outcome::Referenced {
                handle,
                count: Some(count),
            } => write!(f, "add {} -> {} references", handle, count),
            Outcome::Referenced {
                handle,
                count: None,
            } => write!(f, "add {} -> not found", handle),
            Outcome::Dropped { handle, outcome } => match outcome {
                DropOutcome::Released { remaining } => {
                    write!(f, "drop {} -> {} references", handle, remaining)
                }
                DropOutcome::Removed { size } => {
                    write!(f, "drop {} -> removed ({} bytes)", handle, size)
                }
                DropOutcome::NotFound => write!(f, "drop {} -> not found", handle),
            },
            Outcome::Dump(lines) => write!(f, "{}", lines.trim_end()),
            Outcome::Stats(stats) => write!(
                f,
                "capacity={} used={} live={} fragmented={} blocks={} compactions={} pressure={}",
                stats.capacity,
                stats.high_water_mark,
                stats.live_bytes,
                stats.fragmented_bytes,
                stats.live_blocks,
                stats.compactions,
                stats.pressure
            ),
            Outcome::Snapshot(json) => write!(f, "{}", json),
        }
    }
}

/// A pool plus the commands run against it
#[derive(Debug)]
pub struct Session {
    pool: ObjectPool,
}

impl Session {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            pool: ObjectPool::new(config),
        }
    }

    pub fn pool(&self) -> &ObjectPool {
        &self.pool
    }

    pub fn execute(&mut self, command: Command) -> PoolResult<Outcome> {
        let outcome = match command {
            Command::Init => {
                self.pool.initialize();
                Outcome::Initialized
            }
            Command::Teardown => {
                self.pool.teardown()?;
                Outcome::TornDown
            }
            Command::Insert(size) => Outcome::Inserted {
                size,
                handle: self.pool.insert(size)?,
            },
            Command::Retrieve(handle) => Outcome::Retrieved {
                handle,
                len: self.pool.retrieve(handle)?.map(<[u8]>::len),
            },
            Command::AddReference(handle) => Outcome::Referenced {
                handle,
                count: self.pool.add_reference(handle)?,
            },
            Command::DropReference(handle) => Outcome::Dropped {
                handle,
                outcome: self.pool.drop_reference(handle)?,
            },
            Command::Dump => Outcome::Dump(
                self.pool
                    .descriptors()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Command::Stats => Outcome::Stats(self.pool.stats()),
            Command::Snapshot => Outcome::Snapshot(
                serde_json::to_string_pretty(&self.pool.snapshot())
                    .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
            ),
        };
        Ok(outcome)
    }
}
