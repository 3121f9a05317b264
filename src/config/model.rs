// src/config/model.rs

use serde::Deserialize;

/// Default server launch command when `program` is omitted.
pub const DEFAULT_PROGRAM: &str = "java -Xmx1024M -Xms1024M -jar minecraft_server.jar nogui";

/// Top-level configuration as read from a TOML file.
///
/// This is a direct mapping of the config examples:
///
/// ```toml
/// program = "java -Xmx1024M -Xms1024M -jar minecraft_server.jar nogui"
///
/// [[jobs]]
/// job_type = "command_sequence"
/// title = "ping"
/// delay = 1.0
/// groups = [["say hi"], ["say bye"]]
///
/// [[observers]]
/// observer_type = "directory"
/// path = "commands"
/// recursive = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Command line used to launch the server child process.
    #[serde(default = "default_program")]
    pub program: String,

    /// Repeating command-sequence jobs from `[[jobs]]`.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,

    /// Filesystem observers from `[[observers]]`.
    #[serde(default)]
    pub observers: Vec<ObserverConfig>,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            program: default_program(),
            jobs: Vec::new(),
            observers: Vec::new(),
        }
    }
}

/// `[[jobs]]` entry, discriminated by `job_type`.
///
/// An unrecognised `job_type` fails deserialization, which makes it a fatal
/// configuration error at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "job_type")]
pub enum JobConfig {
    #[serde(rename = "command_sequence")]
    CommandSequence(CommandSequenceConfig),
}

/// A repeating sequence of command groups.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandSequenceConfig {
    /// Display name, used when announcing each firing.
    pub title: String,

    /// Interval between firings, in seconds. Must be > 0.
    pub delay: f64,

    /// Group index to start from; taken modulo the number of groups.
    #[serde(default)]
    pub index: usize,

    /// Ordered groups of command strings. Each firing sends one whole
    /// group, then moves on to the next.
    pub groups: Vec<Vec<String>>,
}

/// `[[observers]]` entry, discriminated by `observer_type`.
///
/// An unrecognised `observer_type` fails deserialization, which makes it a
/// fatal configuration error at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "observer_type")]
pub enum ObserverConfig {
    #[serde(rename = "directory")]
    Directory(DirectoryObserverConfig),
}

/// Watch a directory for created or modified files.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryObserverConfig {
    /// Directory to watch.
    pub path: String,

    /// Whether to watch subdirectories as well.
    #[serde(default)]
    pub recursive: bool,
}
