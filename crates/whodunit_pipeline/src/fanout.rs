//! Bounded concurrent map that keeps input order.

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Run `task` over every input with at most `limit` tasks in flight.
///
/// Outputs line up with inputs by index whatever order the tasks finish in.
/// Tasks report failure through their output value, so one failing task never
/// cancels its siblings. A `limit` of zero is treated as one.
///
/// # Examples
///
/// ```
/// # futures::executor::block_on(async {
/// use whodunit_pipeline::map_concurrent;
///
/// let doubled = map_concurrent(vec![1, 2, 3], 2, |_, n| async move { n * 2 }).await;
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # });
/// ```
#[tracing::instrument(skip_all, fields(total = inputs.len(), limit = limit))]
pub async fn map_concurrent<T, R, F, Fut>(inputs: Vec<T>, limit: usize, task: F) -> Vec<R>
where
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = R>,
{
    let total = inputs.len();
    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();

    let mut pending = stream::iter(inputs.into_iter().enumerate())
        .map(|(idx, input)| {
            let fut = task(idx, input);
            async move { (idx, fut.await) }
        })
        .buffer_unordered(limit.max(1));

    while let Some((idx, output)) = pending.next().await {
        tracing::debug!(idx, "Task completed");
        slots[idx] = Some(output);
    }

    slots.into_iter().flatten().collect()
}
