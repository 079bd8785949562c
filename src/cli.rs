//! Command-line arguments for the `memory-match` binary.

use anyhow::{anyhow, bail, Context, Result};

use crate::session::SessionConfig;
use crate::types::Difficulty;

pub const USAGE: &str = "\
usage: memory-match [headless] [--difficulty easy|medium|hard] [--seed N]

  headless      read JSON commands from stdin, write JSON lines to stdout
  --difficulty  difficulty of the first round (default: easy)
  --seed        deck seed for a reproducible deal (default: random)

Environment: MEMORY_MATCH_DIFFICULTY, MEMORY_MATCH_SEED, MEMORY_MATCH_*_DELAY_MS,
MEMORY_MATCH_FRAME_MS, MEMORY_MATCH_LOG_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Interactive terminal game
    #[default]
    Play,
    /// JSON-lines harness on stdin/stdout
    Headless,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    pub mode: Mode,
    pub difficulty: Option<Difficulty>,
    pub seed: Option<u64>,
}

impl Args {
    /// Parse arguments (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Args::default();
        let mut it = args.into_iter().map(Into::into);

        while let Some(arg) = it.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String> {
                inline
                    .clone()
                    .or_else(|| it.next())
                    .ok_or_else(|| anyhow!("{name} requires a value"))
            };

            match flag.as_str() {
                "headless" => out.mode = Mode::Headless,
                "play" => out.mode = Mode::Play,
                "-h" | "--help" | "help" => out.mode = Mode::Help,
                "-d" | "--difficulty" => {
                    let raw = value("--difficulty")?;
                    let d = Difficulty::from_str(&raw)
                        .ok_or_else(|| anyhow!("unknown difficulty {raw:?}"))?;
                    out.difficulty = Some(d);
                }
                "-s" | "--seed" => {
                    let raw = value("--seed")?;
                    let seed = raw
                        .parse()
                        .with_context(|| format!("invalid seed {raw:?}"))?;
                    out.seed = Some(seed);
                }
                other => bail!("unexpected argument {other:?}\n\n{USAGE}"),
            }
        }
        Ok(out)
    }

    /// Overlay command-line values on top of an environment config.
    pub fn apply(&self, config: &mut SessionConfig) {
        if let Some(d) = self.difficulty {
            config.difficulty = d;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_play() {
        let args = Args::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args, Args::default());
    }

    #[test]
    fn parses_mode_and_flags() {
        let args = Args::parse(["headless", "--difficulty", "hard", "--seed=9"]).unwrap();
        assert_eq!(args.mode, Mode::Headless);
        assert_eq!(args.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::parse(["--seed"]).is_err());
        assert!(Args::parse(["--seed", "x"]).is_err());
        assert!(Args::parse(["--difficulty", "insane"]).is_err());
        assert!(Args::parse(["--frobnicate"]).is_err());
    }

    #[test]
    fn command_line_overrides_environment() {
        let mut cfg = SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        };
        Args::parse(["-d", "medium"]).unwrap().apply(&mut cfg);
        assert_eq!(cfg.difficulty, Difficulty::Medium);
        assert_eq!(cfg.seed, Some(1));
    }
}
