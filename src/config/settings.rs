use std::path::PathBuf;

use crate::cli::{Args, Quality};
use crate::metadata::Overrides;

use super::defaults::{CITATION_FILE, VERSION_FILE};

/// Runtime settings for one processing run
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
    pub project_root: PathBuf,
    pub overrides: Overrides,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output_path(),
            quality: args.quality,
            project_root: args.project_root.clone(),
            overrides: Overrides {
                title: args.title.clone(),
                author: args.author.clone(),
                doi: args.doi.clone(),
                url: args.url.clone(),
            },
        }
    }

    /// Path of the citation file under the project root
    pub fn citation_path(&self) -> PathBuf {
        self.project_root.join(CITATION_FILE)
    }

    /// Path of the version descriptor under the project root
    pub fn version_path(&self) -> PathBuf {
        self.project_root.join(VERSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_file_paths() {
        let args = Args {
            input: PathBuf::from("paper.pdf"),
            output: None,
            quality: Quality::Ebook,
            project_root: PathBuf::from("/work/tep-exp"),
            title: None,
            author: None,
            doi: None,
            url: None,
            verbose: 0,
        };
        let settings = Settings::from_args(&args);

        assert_eq!(settings.citation_path(), PathBuf::from("/work/tep-exp/CITATION.cff"));
        assert_eq!(settings.version_path(), PathBuf::from("/work/tep-exp/VERSION.json"));
        assert_eq!(settings.output, PathBuf::from("paper.pdf"));
    }
}
