//! Mine Event Use Case
//!
//! Brute-force proof of work over a draft record: bump the `nonce` tag,
//! restamp `created_at`, rehash, and stop at the first id with enough
//! leading zero bits.

use crate::application::config::BadgeConfig;
use crate::domain::entities::{UnsignedEvent, unix_now};
use crate::domain::repository::EventHasher;
use crate::domain::services::count_leading_zero_bits;
use crate::domain::tag::{RawTag, Tag};
use crate::error::{BadgeError, BadgeResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// Progress snapshot passed to the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningProgress {
    pub nonce: u64,
    /// Difficulty of the id produced by `nonce`
    pub difficulty: u32,
}

/// Successful search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedEvent {
    /// Draft with the final `nonce` tag and timestamp
    pub event: UnsignedEvent,
    /// Id of `event`
    pub id: String,
    pub nonce: u64,
    pub difficulty: u32,
}

impl MinedEvent {
    pub fn tags(&self) -> &[RawTag] {
        &self.event.tags
    }

    pub fn attempts(&self) -> u64 {
        self.nonce + 1
    }
}

/// Shared stop signal for a running search
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Single-threaded nonce search
pub struct ProofOfWorkMiner<H> {
    hasher: Arc<H>,
    max_attempts: u64,
    progress_interval: u64,
    clock: fn() -> u64,
}

impl<H> Clone for ProofOfWorkMiner<H> {
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            max_attempts: self.max_attempts,
            progress_interval: self.progress_interval,
            clock: self.clock,
        }
    }
}

impl<H: EventHasher> ProofOfWorkMiner<H> {
    pub fn new(hasher: Arc<H>, config: &BadgeConfig) -> Self {
        Self {
            hasher,
            max_attempts: config.max_attempts.max(1),
            progress_interval: config.progress_interval.max(1),
            clock: unix_now,
        }
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// Mine `draft` until its id has at least `target_bits` leading zero bits
    ///
    /// A target above the id's bit length can still be met by a longer id;
    /// otherwise the search runs to the attempt ceiling.
    pub fn mine(
        &self,
        draft: UnsignedEvent,
        target_bits: u32,
        on_progress: impl FnMut(MiningProgress),
    ) -> BadgeResult<MinedEvent> {
        self.mine_until(draft, target_bits, on_progress, &CancellationFlag::default())
    }

    /// Same as [`mine`](Self::mine), checking `cancel` before every attempt
    pub fn mine_until(
        &self,
        mut draft: UnsignedEvent,
        target: u32,
        mut on_progress: impl FnMut(MiningProgress),
        cancel: &CancellationFlag,
    ) -> BadgeResult<MinedEvent> {
        draft.tags.retain(|tag| !tag.is_named(Tag::NONCE));
        draft.tags.push(RawTag::default());
        let slot = draft.tags.len() - 1;

        tracing::debug!(
            kind = draft.kind,
            target,
            max_attempts = self.max_attempts,
            "Mining started"
        );

        for nonce in 0..self.max_attempts {
            if cancel.is_cancelled() {
                tracing::info!(attempts = nonce, target, "Mining cancelled");
                return Err(BadgeError::MiningCancelled { attempts: nonce });
            }

            draft.tags[slot] = Tag::nonce(nonce, target).into();
            draft.created_at = (self.clock)();

            let id = self.hasher.event_id(&draft)?;
            let difficulty = count_leading_zero_bits(&id);

            if nonce % self.progress_interval == 0 {
                tracing::debug!(nonce, difficulty, "Mining progress");
                on_progress(MiningProgress { nonce, difficulty });
            }

            if difficulty >= target {
                tracing::info!(
                    id = %id,
                    nonce,
                    difficulty,
                    target,
                    "Mining succeeded"
                );
                return Ok(MinedEvent {
                    event: draft,
                    id,
                    nonce,
                    difficulty,
                });
            }
        }

        tracing::warn!(
            attempts = self.max_attempts,
            target,
            "Mining exceeded attempts"
        );
        Err(BadgeError::MiningExceededAttempts {
            attempts: self.max_attempts,
            target,
        })
    }
}

/// Mining search running on the blocking thread pool
///
/// Dropping the task detaches it; call [`cancel`](Self::cancel) to stop it.
pub struct MiningTask {
    cancel: CancellationFlag,
    handle: JoinHandle<BadgeResult<MinedEvent>>,
}

impl MiningTask {
    pub fn spawn<H, F>(
        miner: ProofOfWorkMiner<H>,
        draft: UnsignedEvent,
        target_bits: u32,
        on_progress: F,
    ) -> Self
    where
        H: EventHasher + 'static,
        F: FnMut(MiningProgress) + Send + 'static,
    {
        Self::spawn_with_cancel(miner, draft, target_bits, on_progress, CancellationFlag::new())
    }

    /// Spawn with an externally owned flag
    pub fn spawn_with_cancel<H, F>(
        miner: ProofOfWorkMiner<H>,
        draft: UnsignedEvent,
        target_bits: u32,
        on_progress: F,
        cancel: CancellationFlag,
    ) -> Self
    where
        H: EventHasher + 'static,
        F: FnMut(MiningProgress) + Send + 'static,
    {
        let flag = cancel.clone();
        let handle = tokio::task::spawn_blocking(move || {
            miner.mine_until(draft, target_bits, on_progress, &flag)
        });
        Self { cancel, handle }
    }

    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the search to finish
    pub async fn join(self) -> BadgeResult<MinedEvent> {
        self.handle.await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::kinds;
    use std::sync::Mutex;

    /// Id is all zeros when the nonce equals `winner`, otherwise all `f`
    struct WinnerHasher {
        winner: u64,
        seen: Mutex<Vec<u64>>,
    }

    impl WinnerHasher {
        fn new(winner: u64) -> Self {
            Self {
                winner,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl EventHasher for WinnerHasher {
        fn event_id(&self, event: &UnsignedEvent) -> BadgeResult<String> {
            let nonce = event
                .tags
                .iter()
                .find(|t| t.is_named("nonce"))
                .and_then(|t| t.value(1).parse::<u64>().ok())
                .ok_or_else(|| BadgeError::Internal("nonce tag missing".into()))?;
            self.seen.lock().unwrap().push(nonce);
            Ok(if nonce == self.winner {
                "0".repeat(64)
            } else {
                "f".repeat(64)
            })
        }
    }

    fn draft() -> UnsignedEvent {
        UnsignedEvent::new(
            kinds::BADGE_DEFINITION,
            "pk",
            vec![
                RawTag::from(["d", "bravery"]),
                RawTag::from(["nonce", "123", "4"]),
                RawTag::from(["name", "Bravery"]),
            ],
        )
    }

    fn miner(hasher: WinnerHasher, max_attempts: u64, progress_interval: u64) -> ProofOfWorkMiner<WinnerHasher> {
        let config = BadgeConfig {
            max_attempts,
            progress_interval,
            ..BadgeConfig::default()
        };
        ProofOfWorkMiner::new(Arc::new(hasher), &config).with_clock(|| 1_700_000_000)
    }

    #[test]
    fn test_target_zero_succeeds_on_first_attempt() {
        let miner = miner(WinnerHasher::new(u64::MAX), 10, 10_000);
        let mined = miner.mine(draft(), 0, |_| {}).unwrap();

        assert_eq!(mined.nonce, 0);
        assert_eq!(mined.attempts(), 1);
        assert_eq!(*miner.hasher.seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_nonce_sequence_and_result() {
        let miner = miner(WinnerHasher::new(5), 100, 10_000);
        let mined = miner.mine(draft(), 16, |_| {}).unwrap();

        assert_eq!(mined.nonce, 5);
        assert_eq!(mined.difficulty, 256);
        assert_eq!(mined.id, "0".repeat(64));
        assert_eq!(*miner.hasher.seen.lock().unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mined.event.created_at, 1_700_000_000);
    }

    #[test]
    fn test_existing_nonce_replaced_by_trailing_tag() {
        let miner = miner(WinnerHasher::new(2), 100, 10_000);
        let mined = miner.mine(draft(), 8, |_| {}).unwrap();

        let nonce_tags: Vec<&RawTag> = mined.tags().iter().filter(|t| t.is_named("nonce")).collect();
        assert_eq!(nonce_tags, vec![&RawTag::from(["nonce", "2", "8"])]);
        assert_eq!(mined.tags().last(), Some(&RawTag::from(["nonce", "2", "8"])));
        assert_eq!(mined.tags()[0], RawTag::from(["d", "bravery"]));
        assert_eq!(mined.tags()[1], RawTag::from(["name", "Bravery"]));
    }

    #[test]
    fn test_progress_cadence() {
        let miner = miner(WinnerHasher::new(25), 100, 10);
        let mut reports = Vec::new();
        miner
            .mine(draft(), 1, |progress| reports.push(progress))
            .unwrap();

        assert_eq!(
            reports,
            vec![
                MiningProgress { nonce: 0, difficulty: 0 },
                MiningProgress { nonce: 10, difficulty: 0 },
                MiningProgress { nonce: 20, difficulty: 0 },
            ]
        );
    }

    #[test]
    fn test_exceeded_attempts() {
        let miner = miner(WinnerHasher::new(u64::MAX), 50, 10_000);
        let err = miner.mine(draft(), 1, |_| {}).unwrap_err();

        assert!(matches!(
            err,
            BadgeError::MiningExceededAttempts { attempts: 50, target: 1 }
        ));
        assert_eq!(miner.hasher.seen.lock().unwrap().len(), 50);
    }

    #[test]
    fn test_target_above_256_runs_to_ceiling() {
        let miner = miner(WinnerHasher::new(0), 20, 10_000);
        let err = miner.mine(draft(), 257, |_| {}).unwrap_err();

        assert!(matches!(
            err,
            BadgeError::MiningExceededAttempts { attempts: 20, target: 257 }
        ));
        assert_eq!(miner.hasher.seen.lock().unwrap().len(), 20);
    }

    struct LongIdHasher;

    impl EventHasher for LongIdHasher {
        fn event_id(&self, _event: &UnsignedEvent) -> BadgeResult<String> {
            Ok("0".repeat(128))
        }
    }

    #[test]
    fn test_target_met_by_longer_id() {
        let config = BadgeConfig {
            max_attempts: 10,
            ..BadgeConfig::default()
        };
        let miner = ProofOfWorkMiner::new(Arc::new(LongIdHasher), &config);
        let mined = miner.mine(draft(), 300, |_| {}).unwrap();

        assert_eq!(mined.nonce, 0);
        assert_eq!(mined.difficulty, 512);
        assert_eq!(mined.tags().last(), Some(&RawTag::from(["nonce", "0", "300"])));
    }

    #[test]
    fn test_cancelled_before_start() {
        let miner = miner(WinnerHasher::new(0), 10, 10);
        let cancel = CancellationFlag::new();
        cancel.cancel();

        let err = miner.mine_until(draft(), 0, |_| {}, &cancel).unwrap_err();
        assert!(matches!(err, BadgeError::MiningCancelled { attempts: 0 }));
        assert!(miner.hasher.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_background_task_completes() {
        let miner = miner(WinnerHasher::new(3), 100, 1);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let task = MiningTask::spawn(miner, draft(), 4, move |p| {
            let _ = tx.send(p);
        });

        let mined = task.join().await.unwrap();
        assert_eq!(mined.nonce, 3);

        let mut nonces = Vec::new();
        while let Some(p) = rx.recv().await {
            nonces.push(p.nonce);
        }
        assert_eq!(nonces, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_background_task_cancel() {
        let miner = miner(WinnerHasher::new(u64::MAX), u64::MAX, 1_000);
        let task = MiningTask::spawn(miner, draft(), 8, |_| {});
        task.cancel();

        let err = task.join().await.unwrap_err();
        assert!(matches!(err, BadgeError::MiningCancelled { .. }));
    }
}
