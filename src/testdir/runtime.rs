use std::future::Future;
use std::io;
use std::panic;
use std::thread;

fn block_on_new_runtime<F: Future>(future: F) -> io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Drives `future` to completion on a runtime that lives for this call only.
///
/// A thread already inside a tokio runtime, such as the body of a
/// `#[tokio::test]`, cannot start a second one, so the future then runs on a
/// scoped helper thread while the caller waits.
pub(crate) fn block_on<F>(future: F) -> io::Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    if tokio::runtime::Handle::try_current().is_err() {
        return block_on_new_runtime(future);
    }

    thread::scope(|scope| {
        scope
            .spawn(|| block_on_new_runtime(future))
            .join()
            .unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}
