//! Streaming audio player
//!
//! A double-ended contract around a `cpal` output stream: the caller
//! appends float sample buffers, the OS audio thread drains them. The
//! sample queue is guarded by a mutex shared between the append path
//! and the stream callback, and playback completion is signaled
//! through a condition variable that the blocking [`Player::play`]
//! waits on. Cancellation is coarse (start/stop); there is no
//! partial-buffer cancellation.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, Stream, StreamConfig};
use log::{debug, warn};

use crate::error::{ResonaError, Result};

/// Mutex-guarded playback queue
///
/// Samples are append-only while playing; `idx` is the read cursor of
/// the stream callback and `played`/`to_play` bound the session.
struct Queue {
    left: Vec<f32>,
    right: Vec<f32>,
    idx: usize,
    played: usize,
    to_play: usize,
    finished: bool,
}

impl Queue {
    /// Mark playback finished and rewind the cursors
    fn finish(&mut self) {
        self.finished = true;
        self.idx = 0;
        self.played = 0;
    }
}

struct Shared {
    queue: Mutex<Queue>,
    done: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Fill one callback buffer from the queue
///
/// Returns true when playback finished inside this callback, so the
/// caller can notify the condition variable.
fn render_into(q: &mut Queue, data: &mut [f32], channels: usize, looping: bool) -> bool {
    let mut just_finished = false;
    if !q.finished && (q.left.is_empty() || q.to_play == 0) {
        q.finish();
        just_finished = true;
    }
    for frame in data.chunks_mut(channels) {
        if q.finished {
            frame.fill(0.0);
            continue;
        }
        frame[0] = q.left[q.idx];
        if channels == 2 {
            frame[1] = q.right[q.idx];
        }
        q.idx += 1;
        q.played += 1;
        if q.played >= q.to_play {
            q.finish();
            just_finished = true;
        } else if q.idx >= q.left.len() {
            if looping {
                q.idx = 0;
            } else {
                q.finish();
                just_finished = true;
            }
        }
    }
    just_finished
}

/// Streaming float-sample player over the default output device
///
/// Mono or stereo, fixed sample rate. The configured rate must be
/// supported by the device or construction fails with
/// [`ResonaError::UnsupportedSampleRate`]. Samples handed to the
/// player are moved in; the caller never retains a reference into a
/// queued buffer.
pub struct Player {
    stream: Stream,
    shared: Arc<Shared>,
    channels: usize,
    sample_rate: f64,
}

impl Player {
    /// Create a mono player, optionally pre-loaded with samples
    ///
    /// `duration` limits playback to that many seconds; without it the
    /// whole queue plays. A duration that exceeds the queued samples
    /// requires `looping`.
    pub fn mono(
        samples: Vec<f32>,
        duration: Option<f64>,
        sample_rate: f64,
        looping: bool,
    ) -> Result<Self> {
        Self::build(1, samples, Vec::new(), duration, sample_rate, looping)
    }

    /// Create a stereo player from per-channel sample buffers
    pub fn stereo(
        left: Vec<f32>,
        right: Vec<f32>,
        duration: Option<f64>,
        sample_rate: f64,
        looping: bool,
    ) -> Result<Self> {
        Self::build(2, left, right, duration, sample_rate, looping)
    }

    fn build(
        channels: usize,
        left: Vec<f32>,
        right: Vec<f32>,
        duration: Option<f64>,
        sample_rate: f64,
        looping: bool,
    ) -> Result<Self> {
        if channels == 2 && left.len() != right.len() {
            return Err(ResonaError::LengthMismatch {
                context: "stereo channel buffers",
                expected: left.len(),
                actual: right.len(),
            });
        }
        let to_play = match duration {
            Some(d) => (sample_rate * d) as usize,
            None => left.len(),
        };
        if to_play > left.len() && !looping {
            return Err(ResonaError::DurationExceedsSamples);
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(ResonaError::NoOutputDevice)?;
        let rate = sample_rate.round() as u32;
        let supported = device
            .supported_output_configs()
            .map_err(|e| ResonaError::AudioBackend {
                reason: e.to_string(),
            })?
            .any(|c| {
                c.channels() as usize == channels
                    && c.sample_format() == SampleFormat::F32
                    && c.min_sample_rate().0 <= rate
                    && rate <= c.max_sample_rate().0
            });
        if !supported {
            return Err(ResonaError::UnsupportedSampleRate {
                requested: sample_rate,
            });
        }
        let config = StreamConfig {
            channels: channels as u16,
            sample_rate: SampleRate(rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                left,
                right,
                idx: 0,
                played: 0,
                to_play,
                finished: true,
            }),
            done: Condvar::new(),
        });
        let callback_shared = Arc::clone(&shared);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut queue = callback_shared.lock();
                    if render_into(&mut queue, data, channels, looping) {
                        callback_shared.done.notify_all();
                    }
                },
                |err| warn!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| ResonaError::AudioBackend {
                reason: e.to_string(),
            })?;
        stream.pause().map_err(|e| ResonaError::AudioBackend {
            reason: e.to_string(),
        })?;
        debug!("opened {channels}-channel output stream at {rate} Hz");

        Ok(Self {
            stream,
            shared,
            channels,
            sample_rate,
        })
    }

    /// Configured sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of output channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// True when no playback session is running
    pub fn is_finished(&self) -> bool {
        self.shared.lock().finished
    }

    /// Start playback; returns false if already playing
    pub fn start(&self) -> Result<bool> {
        {
            let mut queue = self.shared.lock();
            if !queue.finished {
                return Ok(false);
            }
            queue.finished = false;
        }
        if let Err(e) = self.stream.play() {
            self.shared.lock().finished = true;
            return Err(ResonaError::AudioBackend {
                reason: e.to_string(),
            });
        }
        Ok(true)
    }

    /// Stop playback; returns false if nothing was playing
    pub fn stop(&self) -> Result<bool> {
        {
            let queue = self.shared.lock();
            if queue.finished {
                return Ok(false);
            }
        }
        self.stream.pause().map_err(|e| ResonaError::AudioBackend {
            reason: e.to_string(),
        })?;
        let mut queue = self.shared.lock();
        queue.finish();
        self.shared.done.notify_all();
        Ok(true)
    }

    /// Block until the current playback session finishes
    pub fn wait_for_playback(&self) {
        let queue = self.shared.lock();
        let _guard = self
            .shared
            .done
            .wait_while(queue, |q| !q.finished)
            .unwrap_or_else(|e| e.into_inner());
    }

    /// Play the queued samples to completion, blocking
    pub fn play(&self) -> Result<()> {
        self.start()?;
        self.wait_for_playback();
        // Park the device even after a natural finish so it stops
        // pulling silence.
        self.stream.pause().map_err(|e| ResonaError::AudioBackend {
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Append mono samples to the queue
    pub fn add_samples(&self, samples: &[f32]) -> Result<()> {
        if self.channels != 1 {
            return Err(ResonaError::WrongChannelCount {
                configured: self.channels,
            });
        }
        let mut queue = self.shared.lock();
        queue.to_play += samples.len();
        queue.left.extend_from_slice(samples);
        Ok(())
    }

    /// Append per-channel stereo samples to the queue
    pub fn add_stereo_samples(&self, left: &[f32], right: &[f32]) -> Result<()> {
        if self.channels != 2 {
            return Err(ResonaError::WrongChannelCount {
                configured: self.channels,
            });
        }
        if left.len() != right.len() {
            return Err(ResonaError::LengthMismatch {
                context: "stereo channel buffers",
                expected: left.len(),
                actual: right.len(),
            });
        }
        let mut queue = self.shared.lock();
        queue.to_play += left.len();
        queue.left.extend_from_slice(left);
        queue.right.extend_from_slice(right);
        Ok(())
    }

    /// Stop playback and drop all queued samples
    pub fn clear_samples(&self) -> Result<()> {
        self.stop()?;
        let mut queue = self.shared.lock();
        queue.left.clear();
        queue.right.clear();
        queue.to_play = 0;
        Ok(())
    }
}
