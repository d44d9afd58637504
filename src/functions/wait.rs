use std::time::Duration;

use futures::{
    Stream, StreamExt,
    future::{self, BoxFuture},
    stream::{BoxStream, FuturesUnordered},
};
use poise::serenity_prelude as serenity;
use serenity::collector::{MessageCollector, collect};
use serenity::model::event::Event;

use crate::{Context, Error};

/// A pending gateway wait. Resolves to `None` once its own timeout runs out.
pub type Wait<T> = BoxFuture<'static, Option<T>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WaitMode {
    FirstCompleted,
    AllCompleted,
}

/// Waits for a message matching `filter`, optionally telling the invoker when time runs out
pub async fn wait_for_message<F>(
    ctx: Context<'_>,
    filter: F,
    timeout: Duration,
    on_timeout: Option<&str>,
) -> Result<Option<serenity::Message>, Error>
where
    F: Fn(&serenity::Message) -> bool + Send + Sync + 'static,
{
    let message = MessageCollector::new(ctx.serenity_context())
        .filter(filter)
        .timeout(timeout)
        .await;

    if message.is_none() {
        if let Some(text) = on_timeout {
            ctx.say(text).await?;
        }
    }

    Ok(message)
}

/// Starts listening for the first gateway event `extractor` accepts.
///
/// The listener is registered immediately, so events arriving before the
/// returned future is polled are not lost.
pub fn wait_for_event<T, F>(ctx: &serenity::Context, timeout: Duration, extractor: F) -> Wait<T>
where
    T: Send + 'static,
    F: Fn(&Event) -> Option<T> + Send + Sync + 'static,
{
    let mut stream = Box::pin(collect(&ctx.shard, extractor));
    Box::pin(async move { next_within(&mut stream, timeout).await })
}

/// [`wait_for_event`] specialised to newly created messages
pub fn wait_for_message_event<F>(
    ctx: &serenity::Context,
    timeout: Duration,
    filter: F,
) -> Wait<serenity::Message>
where
    F: Fn(&serenity::Message) -> bool + Send + Sync + 'static,
{
    let mut stream = message_stream(ctx, filter);
    Box::pin(async move { next_within(&mut stream, timeout).await })
}

/// Every new message accepted by `filter`, for as long as the stream lives.
///
/// Messages are buffered while the consumer is busy, so pulling them one
/// at a time never misses any.
pub fn message_stream<F>(
    ctx: &serenity::Context,
    filter: F,
) -> BoxStream<'static, serenity::Message>
where
    F: Fn(&serenity::Message) -> bool + Send + Sync + 'static,
{
    Box::pin(collect(&ctx.shard, move |event| match event {
        Event::MessageCreate(created) if filter(&created.message) => {
            Some(created.message.clone())
        }
        _ => None,
    }))
}

/// Next item of `stream`, or `None` if it ends or `timeout` passes first
pub async fn next_within<S>(stream: &mut S, timeout: Duration) -> Option<S::Item>
where
    S: Stream + Unpin,
{
    tokio::time::timeout(timeout, stream.next()).await.ok().flatten()
}

/// Resolves to `true` if the message is deleted before `timeout`
pub async fn wait_for_message_delete(
    ctx: &serenity::Context,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
    timeout: Duration,
) -> bool {
    wait_for_event(ctx, timeout, move |event| match event {
        Event::MessageDelete(deleted)
            if deleted.channel_id == channel_id && deleted.message_id == message_id =>
        {
            Some(())
        }
        _ => None,
    })
    .await
    .is_some()
}

/// Drives several waits at once.
///
/// Results carry the index of the wait they came from. `FirstCompleted`
/// returns only the wait that finished first (which may be a timeout),
/// `AllCompleted` returns every wait in input order.
pub async fn wait_for_any<T: Send + 'static>(
    waits: Vec<Wait<T>>,
    mode: WaitMode,
) -> Vec<(usize, Option<T>)> {
    if waits.is_empty() {
        return Vec::new();
    }

    match mode {
        WaitMode::FirstCompleted => {
            let (result, index, _remaining) = future::select_all(waits).await;
            vec![(index, result)]
        }
        WaitMode::AllCompleted => future::join_all(waits)
            .await
            .into_iter()
            .enumerate()
            .collect(),
    }
}

/// Collects every wait that succeeds within `window`, in completion order
pub async fn wait_for_till<T: Send + 'static>(
    waits: Vec<Wait<T>>,
    window: Duration,
) -> Vec<(usize, T)> {
    let mut pending: FuturesUnordered<_> = waits
        .into_iter()
        .enumerate()
        .map(|(index, wait)| async move { (index, wait.await) })
        .collect();

    let mut completed = Vec::new();
    let _ = tokio::time::timeout(window, async {
        while let Some((index, result)) = pending.next().await {
            if let Some(value) = result {
                completed.push((index, value));
            }
        }
    })
    .await;

    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use tokio::time::sleep;

    fn after(millis: u64, value: Option<u32>) -> Wait<u32> {
        Box::pin(async move {
            sleep(Duration::from_millis(millis)).await;
            value
        })
    }

    #[tokio::test]
    async fn first_completed_returns_the_fastest_wait() {
        let results = wait_for_any(
            vec![after(200, Some(1)), after(10, Some(2))],
            WaitMode::FirstCompleted,
        )
        .await;
        assert_eq!(results, vec![(1, Some(2))]);
    }

    #[tokio::test]
    async fn all_completed_keeps_input_order() {
        let results = wait_for_any(
            vec![after(30, Some(1)), after(5, None), after(10, Some(3))],
            WaitMode::AllCompleted,
        )
        .await;
        assert_eq!(results, vec![(0, Some(1)), (1, None), (2, Some(3))]);
    }

    #[tokio::test]
    async fn no_waits_means_no_results() {
        assert!(wait_for_any::<u32>(Vec::new(), WaitMode::FirstCompleted).await.is_empty());
    }

    #[tokio::test]
    async fn till_drops_late_and_empty_waits() {
        let results = wait_for_till(
            vec![after(5, Some(1)), after(10, None), after(2_000, Some(3)), after(20, Some(4))],
            Duration::from_millis(500),
        )
        .await;
        assert_eq!(results, vec![(0, 1), (3, 4)]);
    }

    #[tokio::test]
    async fn stream_keeps_items_that_arrive_while_busy() {
        let (sender, mut stream) = mpsc::unbounded();
        sender.unbounded_send("a").unwrap();

        let first = next_within(&mut stream, Duration::from_millis(100)).await;
        assert_eq!(first, Some("a"));

        // Both arrive before anyone asks for the next one
        sender.unbounded_send("b").unwrap();
        sender.unbounded_send("c").unwrap();
        sleep(Duration::from_millis(20)).await;

        assert_eq!(next_within(&mut stream, Duration::from_millis(100)).await, Some("b"));
        assert_eq!(next_within(&mut stream, Duration::from_millis(100)).await, Some("c"));
        assert_eq!(next_within(&mut stream, Duration::from_millis(20)).await, None);
    }
}
