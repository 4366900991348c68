//! Streams a register's output to another thread over a crossbeam channel.

use crossbeam::channel::{self, Receiver, Sender};
use log::debug;

use crate::analysis::SequenceAnalyzer;
use crate::error::Error;
use crate::io::{Driver, Sink, StepOrder};
use crate::lfsr::{RegisterCore, Word};

use std::thread::{self, JoinHandle};

/// Forwards `(step_index, value)` pairs to a `Receiver`.
pub struct ChannelSink<T> {
    sender: Sender<(u64, T)>,
    order: StepOrder,
}

impl<T> ChannelSink<T> {
    pub fn new(sender: Sender<(u64, T)>) -> Self {
        ChannelSink {
            sender,
            order: StepOrder::default(),
        }
    }
}

impl<T> Sink<T> for ChannelSink<T> {
    fn accept(&mut self, step_index: u64, value: T) -> Result<(), Error> {
        self.order.check(step_index)?;
        self.sender
            .send((step_index, value))
            .map_err(|_| Error::Disconnected)
    }
}

/// Creates a connected sink and receiver.  `capacity` bounds the number of
/// values in flight; `None` leaves the channel unbounded.
pub fn stream_channel<T>(
    capacity: Option<usize>,
) -> (ChannelSink<T>, Receiver<(u64, T)>) {
    let (send, recv) = match capacity {
        Some(cap) => channel::bounded(cap),
        None => channel::unbounded(),
    };
    (ChannelSink::new(send), recv)
}

/// Moves `core` onto its own thread and streams `count` values from it.
///
/// The thread hands the register back when it is done, so the caller can keep
/// generating from where the stream stopped.  Dropping the receiver early ends
/// the thread with `Error::Disconnected`.
///
/// # Examples
///
/// ```
/// use lfsr_rs::analysis::SequenceAnalyzer;
/// use lfsr_rs::io::channel::spawn_stream;
/// use lfsr_rs::lfsr::RegisterCore;
///
/// let core = RegisterCore::new(8, 0xB8_u8, 1).unwrap();
/// let analyzer = SequenceAnalyzer::new();
/// let (handle, recv) = spawn_stream(core, analyzer, 255, Some(16));
///
/// let values: Vec<u8> = recv.iter().map(|(_, value)| value).collect();
/// assert_eq!(values.len(), 255);
///
/// let core = handle.join().unwrap().unwrap();
/// assert_eq!(core.current(), 1);
/// ```
pub fn spawn_stream<T: Word>(
    mut core: RegisterCore<T>,
    analyzer: SequenceAnalyzer,
    count: usize,
    capacity: Option<usize>,
) -> (JoinHandle<Result<RegisterCore<T>, Error>>, Receiver<(u64, T)>) {
    let (mut sink, recv) = stream_channel(capacity);
    let handle = thread::spawn(move || -> Result<RegisterCore<T>, Error> {
        debug!("streaming {} values on {:?}", count, thread::current().id());
        let mut driver = Driver::new(analyzer);
        driver.run(&mut core, count, &mut sink)?;
        Ok(core)
    });
    (handle, recv)
}
