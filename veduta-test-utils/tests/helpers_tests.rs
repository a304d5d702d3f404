use veduta_test_utils::{assert_no_recv, input_channel, recv_timeout};

#[tokio::test]
async fn test_recv_timeout_returns_the_next_item() {
    let (tx, mut inputs) = input_channel();

    tx.send(5u64).unwrap();

    assert_eq!(recv_timeout(&mut inputs, 100).await, 5);
}

#[tokio::test]
#[should_panic = "no item emitted within 50ms"]
async fn test_recv_timeout_panics_on_silence() {
    let (_tx, mut inputs) = input_channel::<u64>();

    recv_timeout(&mut inputs, 50).await;
}

#[tokio::test]
#[should_panic = "stream ended while waiting for an item"]
async fn test_recv_timeout_panics_when_the_stream_ends() {
    let (tx, mut inputs) = input_channel::<u64>();
    drop(tx);

    recv_timeout(&mut inputs, 100).await;
}

#[tokio::test]
async fn test_assert_no_recv_passes_when_silent() {
    let (_tx, mut inputs) = input_channel::<u64>();

    assert_no_recv(&mut inputs, 50).await;
}

#[tokio::test]
#[should_panic = "unexpected item emitted"]
async fn test_assert_no_recv_panics_on_an_item() {
    let (tx, mut inputs) = input_channel();

    tx.send(1u64).unwrap();

    assert_no_recv(&mut inputs, 100).await;
}
