use super::evolution_engine::ProgressCallback;

/// Logs progress through the `log` facade
pub struct LogProgressCallback {
    every: usize,
}

impl LogProgressCallback {
    /// Reports every `every`th generation; 0 is treated as 1
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1) }
    }
}

impl Default for LogProgressCallback {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hof_size: usize) {
        if (generation + 1) % self.every == 0 {
            log::info!(
                "Generation {} complete. Best fitness: {:.4}, Hall of Fame size: {}",
                generation + 1,
                best_fitness,
                hof_size
            );
        }
    }

    fn on_candidate_evaluated(&mut self, candidate_num: usize, total: usize) {
        if candidate_num == total {
            log::debug!("  Evaluated {}/{} candidates", candidate_num, total);
        }
    }
}

/// Forwards progress to another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, best_fitness: f64, hof_size: usize },
    CandidateEvaluated { current: usize, total: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    // A dropped receiver just stops the reporting
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hof_size: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            hof_size,
        });
    }

    fn on_candidate_evaluated(&mut self, candidate_num: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::CandidateEvaluated {
            current: candidate_num,
            total,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_callback_forwards_messages() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut callback = ChannelProgressCallback::new(tx);

        callback.on_generation_start(0);
        callback.on_candidate_evaluated(3, 3);
        callback.on_generation_complete(0, 1.5, 2);

        let messages: Vec<ProgressMessage> = rx.try_iter().collect();
        assert_eq!(
            messages,
            vec![
                ProgressMessage::GenerationStart(0),
                ProgressMessage::CandidateEvaluated { current: 3, total: 3 },
                ProgressMessage::GenerationComplete { generation: 0, best_fitness: 1.5, hof_size: 2 },
            ]
        );
    }

    #[test]
    fn test_channel_callback_survives_dropped_receiver() {
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        let mut callback = ChannelProgressCallback::new(tx);
        callback.on_generation_start(1);
    }
}
