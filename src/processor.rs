//! Batch processing of captured response bodies.
//!
//! The hook itself handles one body per invocation; this module runs it
//! over many bodies (saved capture files, or one body per stdin line) and
//! yields a reactive stream of per-body outcomes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hook::ResponseHook;
use crate::types::{BodyOutcome, RewriteAction};
use async_stream::stream;
use futures::Stream;
use std::path::PathBuf;

/// Runs the response hook over many bodies, one outcome per body
pub struct ResponsePipeline {
    hook: ResponseHook,
}

impl ResponsePipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            hook: ResponseHook::new(config),
        }
    }

    /// Process saved body files and return a stream of outcomes.
    ///
    /// A file that cannot be read yields an error without ending the
    /// stream; remaining files are still processed.
    pub fn process_files(&self, paths: Vec<PathBuf>) -> impl Stream<Item = Result<BodyOutcome>> {
        let hook = self.hook.clone();
        Box::pin(stream! {
            for path in paths {
                let source = path.display().to_string();
                match tokio::fs::read(&path).await {
                    Ok(bytes) => yield Ok(Self::run_hook(&hook, source, &bytes)),
                    Err(e) => yield Err(Error::Io(e)),
                }
            }
        })
    }

    /// Process bodies supplied one per line, for stdio pipelines:
    /// `cat bodies.ndjson | feedtrim stream`
    pub fn process_lines(
        &self,
        lines: impl Iterator<Item = String> + 'static,
    ) -> impl Stream<Item = Result<BodyOutcome>> {
        let hook = self.hook.clone();
        Box::pin(stream! {
            for (index, line) in lines.enumerate() {
                let source = format!("line {}", index + 1);
                yield Ok(Self::run_hook(&hook, source, line.as_bytes()));
            }
        })
    }

    fn run_hook(hook: &ResponseHook, source: String, bytes: &[u8]) -> BodyOutcome {
        let outcome = hook.process(bytes);
        let passthrough = outcome.action.is_passthrough();
        let body = match outcome.action {
            RewriteAction::Replace(body) => body,
            RewriteAction::Passthrough => String::from_utf8_lossy(bytes).into_owned(),
        };
        BodyOutcome {
            source,
            body,
            passthrough,
            dropped: outcome.dropped,
        }
    }
}
