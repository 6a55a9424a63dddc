//! Run scripts use case.

use satchel_domain::{
    Collection, CollectionElement, ElementId, EventType, ItemGroup, ItemKind, ScriptReport,
    ScriptSource,
};
use tracing::{debug, info};

use crate::ApplicationResult;
use crate::ports::ScriptRunner;

/// Use case for executing the scripts that apply to a request.
///
/// The executed source is the collection's script followed by the script of
/// every enclosing folder and the request's own, outermost first.
pub struct RunScripts<R: ScriptRunner> {
    runner: R,
}

impl<R: ScriptRunner> RunScripts<R> {
    /// Creates a new `RunScripts` use case.
    #[must_use]
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Runs the `listen` scripts for the item `item_id`.
    ///
    /// An empty chain produces an empty report without calling the runner.
    ///
    /// # Errors
    ///
    /// Returns a domain `NotFound` error if the item is not in `collection`,
    /// or the runner's error if the script cannot be executed.
    pub async fn execute(
        &self,
        collection: &Collection,
        item_id: ElementId,
        listen: EventType,
    ) -> ApplicationResult<ScriptReport> {
        let chain = collection.script_chain(item_id, listen)?;
        let name = collection
            .find_by_id(item_id)
            .map_or_else(String::new, |item| item.name().to_owned());
        let source = ScriptSource::from_chain(listen, name, &chain);
        if source.is_empty() {
            debug!(item = %source.item_name, listen = listen.as_str(), "no scripts to run");
            return Ok(ScriptReport::default());
        }

        let report = self.runner.run(&source).await?;
        info!(
            item = %source.item_name,
            listen = listen.as_str(),
            passed = report.passed(),
            failed = report.failed(),
            "ran scripts"
        );
        Ok(report)
    }

    /// Runs the `listen` scripts for every request in the collection, in
    /// depth-first order, returning each request's name and report.
    ///
    /// # Errors
    ///
    /// Stops at the first request whose scripts cannot be executed.
    pub async fn execute_all(
        &self,
        collection: &Collection,
        listen: EventType,
    ) -> ApplicationResult<Vec<(String, ScriptReport)>> {
        let mut reports = Vec::new();
        for item in collection.get_items(Some(ItemKind::Request)) {
            let report = self.execute(collection, item.id(), listen).await?;
            reports.push((item.name().to_owned(), report));
        }
        Ok(reports)
    }
}
