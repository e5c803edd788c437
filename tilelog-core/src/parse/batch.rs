use crate::conf::ParserConfig;
use crate::parse::{LineError, parse_line};
use crate::request::TileRequest;
use crate::store::RequestStore;
use std::num::NonZeroUsize;
use std::thread;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed(TileRequest),
    /// Blank, or matched an ignore pattern.
    Skipped,
    Failed(LineError),
}

/// A problem tied to a 1-based input line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    pub line_number: usize,
    pub error: LineError,
}

/// Result of parsing a whole batch. Failures never stop the batch.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub store: RequestStore,
    /// Lines that were dropped.
    pub failures: Vec<LineIssue>,
    /// Non-fatal findings on lines that were kept.
    pub warnings: Vec<LineIssue>,
    pub skipped: usize,
    pub lines_read: usize,
}

impl ParseReport {
    pub fn parsed(&self) -> usize {
        self.store.len()
    }

    /// Fraction of non-skipped lines that failed. `0.0` for an empty batch.
    pub fn failure_rate(&self) -> f64 {
        let considered = self.parsed() + self.failures.len();
        if considered == 0 {
            return 0.0;
        }
        self.failures.len() as f64 / considered as f64
    }

    fn record(&mut self, line_number: usize, outcome: LineOutcome) {
        self.lines_read += 1;

        match outcome {
            LineOutcome::Parsed(request) => {
                for token in request.unknown_cache_outcomes() {
                    tracing::warn!(line_number, token, "unknown cache outcome");
                    self.warnings.push(LineIssue {
                        line_number,
                        error: LineError::UnknownCacheOutcome {
                            token: token.to_string(),
                        },
                    });
                }
                self.store.add(request);
            }
            LineOutcome::Skipped => self.skipped += 1,
            LineOutcome::Failed(error) => {
                tracing::debug!(line_number, error = %error, "rejected log line");
                self.failures.push(LineIssue { line_number, error });
            }
        }
    }

    fn finish(self) -> Self {
        tracing::info!(
            lines = self.lines_read,
            parsed = self.parsed(),
            failed = self.failures.len(),
            skipped = self.skipped,
            warnings = self.warnings.len(),
            "parsed log batch"
        );
        self
    }
}

/// Runs lines through [`parse_line`], skipping ignorable traffic.
#[derive(Debug, Clone)]
pub struct BatchParser {
    ignore: Vec<String>,
}

impl Default for BatchParser {
    fn default() -> Self {
        Self::from_config(&ParserConfig::default())
    }
}

impl BatchParser {
    pub fn new(ignore: Vec<String>) -> Self {
        Self { ignore }
    }

    pub fn from_config(cfg: &ParserConfig) -> Self {
        Self::new(cfg.ignore.clone())
    }

    pub fn classify(&self, line: &str) -> LineOutcome {
        if line.trim().is_empty() || self.ignore.iter().any(|p| line.contains(p.as_str())) {
            return LineOutcome::Skipped;
        }

        match parse_line(line) {
            Ok(request) => LineOutcome::Parsed(request),
            Err(error) => LineOutcome::Failed(error),
        }
    }

    pub fn parse_lines<I, S>(&self, lines: I) -> ParseReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ParseReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            report.record(index + 1, self.classify(line.as_ref()));
        }
        report.finish()
    }

    /// Parses `lines` on up to `workers` scoped threads.
    ///
    /// The resulting store has the same order as [`BatchParser::parse_lines`]
    /// would produce for the same input.
    pub fn parse_parallel<S>(&self, lines: &[S], workers: NonZeroUsize) -> ParseReport
    where
        S: AsRef<str> + Sync,
    {
        if workers.get() == 1 || lines.len() < 2 {
            return self.parse_lines(lines);
        }

        let chunk_len = lines.len().div_ceil(workers.get());

        let mut shards: Vec<Vec<(usize, LineOutcome)>> = thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_len)
                .enumerate()
                .map(|(shard, chunk)| {
                    let offset = shard * chunk_len;
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .enumerate()
                            .map(|(i, line)| (offset + i + 1, self.classify(line.as_ref())))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(shard) => shard,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        // Shards come back in spawn order, but order by line number regardless.
        shards.sort_by_key(|shard| shard.first().map(|(line_number, _)| *line_number));

        let mut report = ParseReport::default();
        for (line_number, outcome) in shards.into_iter().flatten() {
            report.record(line_number, outcome);
        }
        report.finish()
    }
}
