use std::path::PathBuf;
use structopt::StructOpt;

/// Print the headers and flow of captured Ethernet frames.
#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "wireview-dump")]
pub struct Config {
    /// Capture to read, standard input if omitted.
    ///
    /// One hex encoded frame per line. Whitespace and colons between digits are ignored, as are
    /// empty lines and lines starting with `#`.
    #[structopt(parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Read the input as one raw binary frame instead.
    #[structopt(long = "binary")]
    pub binary: bool,

    /// Also print the innermost payload as hex.
    #[structopt(short = "p", long = "payload")]
    pub payload: bool,
}

impl Config {
    pub fn from_args() -> Self {
        StructOpt::from_args()
    }
}
