//! Parsing of line-oriented commands

use crate::core_social::PostLimit;
use thiserror::Error;

/// A single parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddUser { name: String },
    AddFriend { a: String, b: String },
    ListFriends { name: String },
    SuggestFriends { name: String, count: i64 },
    DegreesOfSeparation { a: String, b: String },
    AddPost { name: String, content: String },
    OutputPosts { name: String, limit: PostLimit },
}

/// Reasons a command line is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} is missing argument <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid number for {command}: {value}")]
    InvalidNumber { command: &'static str, value: String },

    #[error("Post content must be wrapped in double quotes: {0}")]
    UnquotedContent(String),
}

/// Split off the next whitespace-delimited token
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

struct Args<'a> {
    command: &'static str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> Result<String, CommandError> {
        let (token, rest) = next_token(self.rest).ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })?;
        self.rest = rest;
        Ok(token.to_string())
    }

    fn number(&mut self, argument: &'static str) -> Result<i64, CommandError> {
        let token = self.word(argument)?;
        token.parse().map_err(|_| CommandError::InvalidNumber {
            command: self.command,
            value: token,
        })
    }

    /// Remainder of the line as a quoted string, quotes removed
    fn quoted(&mut self) -> Result<String, CommandError> {
        let raw = self.rest.trim();
        self.rest = "";
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            Ok(raw[1..raw.len() - 1].to_string())
        } else {
            Err(CommandError::UnquotedContent(raw.to_string()))
        }
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let Some((keyword, rest)) = next_token(line) else {
            return Ok(None);
        };

        let command = match keyword {
            "ADD_USER" => {
                let mut args = Args { command: "ADD_USER", rest };
                Command::AddUser {
                    name: args.word("username")?,
                }
            }
            "ADD_FRIEND" => {
                let mut args = Args { command: "ADD_FRIEND", rest };
                Command::AddFriend {
                    a: args.word("username1")?,
                    b: args.word("username2")?,
                }
            }
            "LIST_FRIENDS" => {
                let mut args = Args { command: "LIST_FRIENDS", rest };
                Command::ListFriends {
                    name: args.word("username")?,
                }
            }
            "SUGGEST_FRIENDS" => {
                let mut args = Args { command: "SUGGEST_FRIENDS", rest };
                Command::SuggestFriends {
                    name: args.word("username")?,
                    count: args.number("N")?,
                }
            }
            "DEGREES_OF_SEPARATION" => {
                let mut args = Args { command: "DEGREES_OF_SEPARATION", rest };
                Command::DegreesOfSeparation {
                    a: args.word("username1")?,
                    b: args.word("username2")?,
                }
            }
            "ADD_POST" => {
                let mut args = Args { command: "ADD_POST", rest };
                Command::AddPost {
                    name: args.word("username")?,
                    content: args.quoted()?,
                }
            }
            "OUTPUT_POSTS" => {
                let mut args = Args { command: "OUTPUT_POSTS", rest };
                Command::OutputPosts {
                    name: args.word("username")?,
                    limit: PostLimit::from_raw(args.number("N")?),
                }
            }
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Command keyword as written in scripts
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::AddUser { .. } => "ADD_USER",
            Command::AddFriend { .. } => "ADD_FRIEND",
            Command::ListFriends { .. } => "LIST_FRIENDS",
            Command::SuggestFriends { .. } => "SUGGEST_FRIENDS",
            Command::DegreesOfSeparation { .. } => "DEGREES_OF_SEPARATION",
            Command::AddPost { .. } => "ADD_POST",
            Command::OutputPosts { .. } => "OUTPUT_POSTS",
        }
    }
}
