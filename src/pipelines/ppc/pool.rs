/*! Worker pool

Fixed-size pool of worker threads, fed through a bounded queue.

```text
             bounded              bounded
producer ──► work queue ──► N workers ──► result queue ──► sink (calling thread)
```

- Each worker builds its own state (usually an analyzer) once, before taking any item.
  That state is never shared.
- Results reach the sink in completion order, not in input order.
- The producer blocks when the work queue is full, so it never reads far ahead of the workers.
- A panic while working on an item is caught and reported as an [Error::WorkerPanic] for that item,
  and the worker rebuilds its state before going on.
- If the sink fails, the result queue is closed, which stops the workers and then the producer.
!*/
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};

use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, error, info};

use crate::error::Error;

/// Handle used by the producer to push work items.
pub struct Feeder<T> {
    tx: Sender<T>,
}

impl<T> Feeder<T> {
    /// Push an item, blocking while the queue is full.
    ///
    /// Returns `false` if the pool stopped accepting items, in which case producing should stop.
    pub fn feed(&self, item: T) -> bool {
        self.tx.send(item).is_ok()
    }
}

enum Message<U> {
    Done(Result<U, Error>),
    InitFailed(usize, Error),
}

pub struct WorkerPool {
    workers: usize,
    queue_depth: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(workers, 2 * workers)
    }
}

impl WorkerPool {
    /// Create a pool of `workers` threads with a work queue holding at most `queue_depth` items.
    ///
    /// Both values are raised to 1 if 0.
    pub fn new(workers: usize, queue_depth: usize) -> Self {
        Self {
            workers: workers.max(1),
            queue_depth: queue_depth.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_depth(&self) -> usize {
        self.queue_depth
    }

    /// Run the pool until the producer is done and every item has been processed.
    ///
    /// - `produce` runs on its own thread and pushes items using the provided [Feeder].
    /// - `init` is called once per worker (with the worker id) to build its state.
    /// - `work` processes one item using the worker state.
    /// - `sink` is called on the calling thread for each result.
    ///
    /// Returns the number of results passed to the sink.
    pub fn run<T, U, A, P, I, W, S>(
        &self,
        produce: P,
        init: I,
        work: W,
        mut sink: S,
    ) -> Result<usize, Error>
    where
        T: Send,
        U: Send,
        P: FnOnce(&Feeder<T>) -> Result<(), Error> + Send,
        I: Fn(usize) -> Result<A, Error> + Sync,
        W: Fn(&mut A, T) -> Result<U, Error> + Sync,
        S: FnMut(Result<U, Error>) -> Result<(), Error>,
    {
        let (work_tx, work_rx) = bounded::<T>(self.queue_depth);
        let (result_tx, result_rx) = bounded::<Message<U>>(self.queue_depth);

        info!(
            "starting {} workers (queue depth {})",
            self.workers, self.queue_depth
        );

        let scoped = crossbeam::scope(|s| {
            let producer = s.spawn(move |_| {
                let feeder = Feeder { tx: work_tx };
                produce(&feeder)
            });

            for id in 0..self.workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let init = &init;
                let work = &work;
                s.spawn(move |_| Self::work_loop(id, work_rx, result_tx, init, work));
            }

            // only workers hold these now
            drop(work_rx);
            drop(result_tx);

            let mut nb_results = 0;
            let mut failure = None;
            for message in result_rx.iter() {
                match message {
                    Message::Done(result) => {
                        nb_results += 1;
                        if let Err(e) = sink(result) {
                            failure = Some(e);
                            break;
                        }
                    }
                    Message::InitFailed(id, e) => {
                        error!("[worker {}] initialization failed: {:?}", id, e);
                        failure = Some(e);
                        break;
                    }
                }
            }

            // closing the result queue stops workers, which in turn stops the producer.
            drop(result_rx);

            let produced = producer.join().unwrap_or_else(|payload| {
                Err(Error::WorkerPanic {
                    message: panic_message(payload.as_ref()),
                })
            });

            match (failure, produced) {
                (Some(e), _) => Err(e),
                (None, Err(e)) => Err(e),
                (None, Ok(())) => Ok(nb_results),
            }
        });

        scoped.unwrap_or_else(|payload| {
            Err(Error::WorkerPanic {
                message: panic_message(payload.as_ref()),
            })
        })
    }

    /// Run the pool over an iterator of items.
    pub fn run_iter<T, U, A, It, I, W, S>(
        &self,
        items: It,
        init: I,
        work: W,
        sink: S,
    ) -> Result<usize, Error>
    where
        T: Send,
        U: Send,
        It: IntoIterator<Item = T>,
        It::IntoIter: Send,
        I: Fn(usize) -> Result<A, Error> + Sync,
        W: Fn(&mut A, T) -> Result<U, Error> + Sync,
        S: FnMut(Result<U, Error>) -> Result<(), Error>,
    {
        let items = items.into_iter();
        self.run(
            move |feeder| {
                for item in items {
                    if !feeder.feed(item) {
                        break;
                    }
                }
                Ok(())
            },
            init,
            work,
            sink,
        )
    }

    fn work_loop<T, U, A, I, W>(
        id: usize,
        rx: Receiver<T>,
        tx: Sender<Message<U>>,
        init: &I,
        work: &W,
    ) where
        I: Fn(usize) -> Result<A, Error>,
        W: Fn(&mut A, T) -> Result<U, Error>,
    {
        debug!("[worker {}] initializing", id);
        let mut state = match init(id) {
            Ok(state) => state,
            Err(e) => {
                let _ = tx.send(Message::InitFailed(id, e));
                return;
            }
        };

        for item in rx.iter() {
            let result = match panic::catch_unwind(AssertUnwindSafe(|| work(&mut state, item))) {
                Ok(result) => result,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!("[worker {}] panicked: {}", id, message);

                    // state may be left inconsistent by the panic
                    state = match init(id) {
                        Ok(state) => state,
                        Err(e) => {
                            let _ = tx.send(Message::InitFailed(id, e));
                            return;
                        }
                    };
                    Err(Error::WorkerPanic { message })
                }
            };

            if tx.send(Message::Done(result)).is_err() {
                debug!("[worker {}] result queue closed, stopping", id);
                return;
            }
        }
        debug!("[worker {}] done", id);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
