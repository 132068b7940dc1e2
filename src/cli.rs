use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "assetprobe")]
#[command(version)]
#[command(about = "Identify Unity asset containers", long_about = None)]
#[command(after_help = "Examples:\n  \
  assetprobe data.unity3d level0      print the container type of each file\n  \
  assetprobe -u Build/*.data.gz       look inside gzip/brotli web builds\n  \
  assetprobe -s -q StreamingAssets/*  count files per container type")]
pub struct Cli {
    /// Files to inspect
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<String>,

    /// Do not strip a whole-file zstd wrapper before classifying
    #[arg(short = 'r', long = "raw")]
    pub raw: bool,

    /// Peel gzip/brotli web compression and report the inner type
    #[arg(short = 'u', long = "unwrap")]
    pub unwrap: bool,

    /// Number of files inspected at once (default: available cores)
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Print the number of files per container type
    #[arg(short = 's', long = "summary")]
    pub summary: bool,

    /// Verbose logging (-vv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Concurrency limit; never zero
    pub fn jobs(&self) -> usize {
        self.jobs.filter(|&n| n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
