use futures::stream::StreamExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::sleep;

/// Waits for the next stream item, panicking if none arrives in time.
pub async fn recv_timeout<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            item.expect("stream ended while waiting for an item")
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("no item emitted within {timeout_ms}ms");
        }
    }
}

/// Asserts that the stream stays silent for the given window.
pub async fn assert_no_recv<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("unexpected item emitted, expected no output");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}
