use crate::math::algorithms::MotionSample;
use bevy::prelude::*;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

/// Kanal vom Bewegungssensor zur Shading-Berechnung.
///
/// Genau ein Erzeuger: der Sender kann einmal über `take_sender` entnommen werden.
/// Das ECS leert den Empfänger einmal pro Tick.
#[derive(Resource, Debug)]
pub struct SensorFeed {
    sender: Option<Sender<MotionSample>>,
    receiver: Mutex<Receiver<MotionSample>>,
}

impl Default for SensorFeed {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender: Some(sender),
            receiver: Mutex::new(receiver),
        }
    }
}

impl SensorFeed {
    pub fn take_sender(&mut self) -> Option<Sender<MotionSample>> {
        self.sender.take()
    }

    /// Alle seit dem letzten Aufruf eingegangenen Werte, in Empfangsreihenfolge.
    pub fn drain(&self) -> Vec<MotionSample> {
        match self.receiver.lock() {
            Ok(receiver) => receiver.try_iter().collect(),
            Err(_) => {
                warn!("Sensor feed receiver is poisoned, dropping samples");
                Vec::new()
            }
        }
    }
}
