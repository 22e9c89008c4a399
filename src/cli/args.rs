use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdf-release")]
#[command(
    author,
    version,
    about = "Compress a research PDF and embed CITATION.cff bibliographic metadata"
)]
pub struct Args {
    /// Input PDF file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PDF file path (defaults to replacing the input in place)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ghostscript compression quality
    #[arg(short = 'q', long, value_enum, default_value = "ebook")]
    pub quality: Quality,

    /// Project root containing CITATION.cff and VERSION.json
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Override Title metadata
    #[arg(long)]
    pub title: Option<String>,

    /// Override Author and Creator metadata
    #[arg(long)]
    pub author: Option<String>,

    /// Override DOI metadata (Identifier and the Subject DOI segment)
    #[arg(long)]
    pub doi: Option<String>,

    /// URL appended to the Subject metadata
    #[arg(long)]
    pub url: Option<String>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Ghostscript compression quality preset
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Quality {
    Screen,
    #[default]
    Ebook,
    Printer,
    Prepress,
    Default,
}

impl Quality {
    /// The -dPDFSETTINGS value Ghostscript expects
    pub fn gs_setting(&self) -> &'static str {
        match self {
            Quality::Screen => "/screen",
            Quality::Ebook => "/ebook",
            Quality::Printer => "/printer",
            Quality::Prepress => "/prepress",
            Quality::Default => "/default",
        }
    }
}

impl Args {
    /// Get the output path, defaulting to in-place processing
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.input.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            input: PathBuf::from("paper.pdf"),
            output: None,
            quality: Quality::Ebook,
            project_root: PathBuf::from("."),
            title: None,
            author: None,
            doi: None,
            url: None,
            verbose: 0,
        }
    }

    #[test]
    fn test_output_defaults_to_input() {
        assert_eq!(args().output_path(), PathBuf::from("paper.pdf"));
    }

    #[test]
    fn test_explicit_output_wins() {
        let mut args = args();
        args.output = Some(PathBuf::from("out/final.pdf"));
        assert_eq!(args.output_path(), PathBuf::from("out/final.pdf"));
    }

    #[test]
    fn test_gs_settings() {
        assert_eq!(Quality::Screen.gs_setting(), "/screen");
        assert_eq!(Quality::Ebook.gs_setting(), "/ebook");
        assert_eq!(Quality::Printer.gs_setting(), "/printer");
        assert_eq!(Quality::Prepress.gs_setting(), "/prepress");
        assert_eq!(Quality::Default.gs_setting(), "/default");
    }
}
