use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "studyquiz", version, about = "Timed quiz sessions in the terminal")]
pub struct Cli {
    /// Quiz file (.md, .yaml) or directory containing one [default: .]
    #[arg(default_value = ".")]
    pub path: String,

    /// Validate the quiz and print a summary without entering the TUI
    #[arg(long)]
    pub check: bool,

    /// Write a result report (YAML) here when the quiz is completed
    #[arg(long, value_name = "path")]
    pub report: Option<String>,

    /// Override the quiz duration
    #[arg(long, value_name = "minutes")]
    pub duration: Option<u32>,

    /// Log file [default: platform data dir]
    #[arg(long, value_name = "path")]
    pub log_file: Option<String>,
}
