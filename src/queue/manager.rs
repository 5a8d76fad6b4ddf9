use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::QueueError;
use crate::queue::store::{DeckStore, Slot};

/// Consecutive correct answers required before a card graduates.
pub const PROMOTION_STREAK: u32 = 4;

/// A card with `streak` correct answers is re-inserted `streak * 4` slots
/// deep, so it resurfaces with increasing delay.
pub const RESURFACE_SPACING: usize = 4;

/// Which backing file a session draws its cards from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Review cards already in the learned file.
    Old,
    /// Study cards from the unlearned file.
    New,
    /// Study the full deck.
    All,
}

impl Mode {
    pub fn slot(self) -> Slot {
        match self {
            Mode::Old => Slot::Learned,
            Mode::New => Slot::Unlearned,
            Mode::All => Slot::All,
        }
    }

    /// Persistence gate table. The gates are asymmetric: a promotion during
    /// an `Old` session and a demotion during a `New` session touch no
    /// files at all.
    pub fn persists_promotion(self) -> bool {
        matches!(self, Mode::New | Mode::All)
    }

    pub fn persists_demotion(self) -> bool {
        matches!(self, Mode::Old | Mode::All)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardEntry {
    /// Raw line from the deck file, trailing newline included. The bytes
    /// are the card's identity across all three slots.
    pub text: String,
    /// Consecutive correct answers since the card last sat at streak 0.
    pub streak: u32,
}

/// The question-queue state machine. Owns the in-memory queue, the session
/// counters, and the sole handle on the deck files. Position 0 is the
/// current card; insertion position encodes scheduling priority.
pub struct QueueManager {
    store: DeckStore,
    mode: Option<Mode>,
    queue: Vec<CardEntry>,
    learned_count: usize,
    in_process_count: usize,
    shuffle: bool,
    rng: SmallRng,
}

impl QueueManager {
    pub fn new(store: DeckStore) -> Self {
        Self::with_rng(store, SmallRng::from_entropy())
    }

    /// Seedable constructor so tests can pin the shuffled load order.
    pub fn with_rng(store: DeckStore, rng: SmallRng) -> Self {
        Self {
            store,
            mode: None,
            queue: Vec::new(),
            learned_count: 0,
            in_process_count: 0,
            shuffle: true,
            rng,
        }
    }

    pub fn store(&self) -> &DeckStore {
        &self.store
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Start a review session over the learned file.
    pub fn repeat_old(&mut self) -> Result<(), QueueError> {
        self.start_session(Mode::Old)
    }

    /// Start a session over the unlearned file.
    pub fn learn_new(&mut self) -> Result<(), QueueError> {
        self.start_session(Mode::New)
    }

    /// Start a session over the whole deck.
    pub fn repeat_all(&mut self) -> Result<(), QueueError> {
        self.start_session(Mode::All)
    }

    /// Reset queue and counters, then load the mode's file. Calling this
    /// mid-session discards the in-memory progress of the running session;
    /// promotions and demotions already written to disk stay written.
    fn start_session(&mut self, mode: Mode) -> Result<(), QueueError> {
        self.queue.clear();
        self.learned_count = 0;
        self.in_process_count = 0;
        self.mode = Some(mode);
        self.load_queue(mode)
    }

    fn load_queue(&mut self, mode: Mode) -> Result<(), QueueError> {
        for text in self.store.read_lines(mode.slot())? {
            let entry = CardEntry { text, streak: 0 };
            if self.shuffle {
                // Not a uniform shuffle: the slot range runs one past the
                // end, and out-of-range slots clamp to a back insert, so
                // the tail is picked twice as often. Session order depends
                // on reproducing this exactly.
                let slot = self.rng.gen_range(0..=self.queue.len() + 1);
                self.queue.insert(slot.min(self.queue.len()), entry);
            } else {
                self.queue.push(entry);
            }
        }
        Ok(())
    }

    /// Text of the card at the front of the queue, or None once the
    /// session has drained. Pure read.
    pub fn current_card(&self) -> Option<&str> {
        self.queue.first().map(|entry| entry.text.as_str())
    }

    /// Record a correct answer for the front card. At `PROMOTION_STREAK`
    /// the card graduates: it leaves the queue and the deck files are
    /// updated per the mode's persistence gate. Below the threshold it is
    /// re-inserted deeper into the queue.
    pub fn accept_current(&mut self) -> Result<(), QueueError> {
        let entry = self.queue.first_mut().ok_or(QueueError::EmptyQueue)?;
        entry.streak += 1;

        if entry.streak >= PROMOTION_STREAK {
            // The learned-file write reads the front entry and, in All
            // mode, the learned file itself, so it runs before the pop.
            self.record_promotion()?;
            let entry = self.queue.remove(0);
            self.scrub_unlearned(&entry.text)?;
            self.learned_count += 1;
            if self.in_process_count >= 1 {
                self.in_process_count -= 1;
            }
        } else {
            if entry.streak == 1 {
                self.in_process_count += 1;
            }
            let depth = entry.streak as usize * RESURFACE_SPACING;
            let entry = self.queue.remove(0);
            let depth = depth.min(self.queue.len());
            self.queue.insert(depth, entry);
        }
        Ok(())
    }

    /// Record a wrong answer for the front card: streak back to 0, card
    /// stays at the front, and the demotion is persisted per the mode's
    /// gate.
    pub fn fail_current(&mut self) -> Result<(), QueueError> {
        let entry = self.queue.first_mut().ok_or(QueueError::EmptyQueue)?;
        if self.in_process_count >= 1 && entry.streak > 0 {
            self.in_process_count -= 1;
        }
        entry.streak = 0;
        let text = entry.text.clone();
        self.scrub_learned(&text)?;
        self.record_demotion(&text)?;
        Ok(())
    }

    /// Push the front card to the back of the queue with its streak reset.
    /// Touches no files.
    pub fn skip_current(&mut self) -> Result<(), QueueError> {
        if self.queue.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let entry = self.queue.remove(0);
        if entry.streak > 0 {
            self.in_process_count = self.in_process_count.saturating_sub(1);
        }
        self.queue.push(CardEntry {
            text: entry.text,
            streak: 0,
        });
        Ok(())
    }

    /// Cards promoted this session. Resets to 0 at every session start.
    pub fn learned_count(&self) -> usize {
        self.learned_count
    }

    /// Remaining cards, defined as the live queue length.
    pub fn unlearned_count(&self) -> usize {
        self.queue.len()
    }

    /// Cards with a streak in 1..PROMOTION_STREAK.
    pub fn in_process_count(&self) -> usize {
        self.in_process_count
    }

    /// Affects future loads only; the current queue order stays put.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Add the front card to the learned file. New: plain append. All:
    /// set-union rewrite, which drops duplicates and loses line order.
    fn record_promotion(&self) -> Result<(), QueueError> {
        let Some(mode) = self.mode else { return Ok(()) };
        if !mode.persists_promotion() {
            return Ok(());
        }
        let Some(front) = self.queue.first() else {
            return Ok(());
        };
        let text = &front.text;
        match mode {
            Mode::New => self.store.append(Slot::Learned, text)?,
            Mode::All => {
                let mut learned = self.store.read_set(Slot::Learned)?;
                learned.insert(text.clone());
                self.store.overwrite(Slot::Learned, &learned)?;
            }
            Mode::Old => {}
        }
        Ok(())
    }

    /// Drop a promoted card from the unlearned file. New: rewrite from the
    /// remaining queue (the card has already been popped). All: set-filter
    /// rewrite.
    fn scrub_unlearned(&self, text: &str) -> Result<(), QueueError> {
        let Some(mode) = self.mode else { return Ok(()) };
        if !mode.persists_promotion() {
            return Ok(());
        }
        match mode {
            Mode::New => {
                let remaining = self.queue.iter().map(|entry| entry.text.as_str());
                self.store.overwrite(Slot::Unlearned, remaining)?;
            }
            Mode::All => {
                let unlearned: Vec<String> = self
                    .store
                    .read_set(Slot::Unlearned)?
                    .into_iter()
                    .filter(|line| line != text)
                    .collect();
                self.store.overwrite(Slot::Unlearned, &unlearned)?;
            }
            Mode::Old => {}
        }
        Ok(())
    }

    /// Drop a failed card from the learned file. Old: rewrite from every
    /// queue entry behind the front card. All: set-filter rewrite.
    fn scrub_learned(&self, text: &str) -> Result<(), QueueError> {
        let Some(mode) = self.mode else { return Ok(()) };
        if !mode.persists_demotion() {
            return Ok(());
        }
        match mode {
            Mode::Old => {
                let behind = self.queue[1..].iter().map(|entry| entry.text.as_str());
                self.store.overwrite(Slot::Learned, behind)?;
            }
            Mode::All => {
                let learned: Vec<String> = self
                    .store
                    .read_set(Slot::Learned)?
                    .into_iter()
                    .filter(|line| line != text)
                    .collect();
                self.store.overwrite(Slot::Learned, &learned)?;
            }
            Mode::New => {}
        }
        Ok(())
    }

    /// Add a failed card to the unlearned file. Old: plain append. All:
    /// set-union rewrite.
    fn record_demotion(&self, text: &str) -> Result<(), QueueError> {
        let Some(mode) = self.mode else { return Ok(()) };
        if !mode.persists_demotion() {
            return Ok(());
        }
        match mode {
            Mode::Old => self.store.append(Slot::Unlearned, text)?,
            Mode::All => {
                let mut unlearned = self.store.read_set(Slot::Unlearned)?;
                unlearned.insert(text.to_string());
                self.store.overwrite(Slot::Unlearned, &unlearned)?;
            }
            Mode::New => {}
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn queue_entries(&self) -> &[CardEntry] {
        &self.queue
    }
}
