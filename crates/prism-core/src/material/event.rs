// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Change notification for materials.
//!
//! Observers that need to react to property changes (editors, inspectors,
//! scene bookkeeping) subscribe to a material and receive one
//! [`MaterialChange`] per setter call over a channel. Notification is
//! independent of dirty tracking: draining or dropping a receiver never
//! changes what the next synchronization pushes.

use super::MaterialProperty;

/// Published every time a material property setter is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialChange {
    /// The property whose setter was called.
    pub property: MaterialProperty,
}

/// The list of live subscribers of a single material.
#[derive(Debug, Default)]
pub(crate) struct ChangeSubscribers {
    senders: Vec<flume::Sender<MaterialChange>>,
}

impl ChangeSubscribers {
    /// Registers a new subscriber and returns its receiving end.
    pub(crate) fn subscribe(&mut self) -> flume::Receiver<MaterialChange> {
        let (sender, receiver) = flume::unbounded();
        self.senders.push(sender);
        receiver
    }

    /// Sends `change` to every subscriber, forgetting those whose receiver
    /// was dropped.
    pub(crate) fn publish(&mut self, change: MaterialChange) {
        if self.senders.is_empty() {
            return;
        }
        self.senders.retain(|sender| sender.send(change).is_ok());
        log::trace!(
            "Published {} change to {} subscriber(s).",
            change.property,
            self.senders.len()
        );
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;

    fn change(property: MaterialProperty) -> MaterialChange {
        MaterialChange { property }
    }

    #[test]
    fn every_subscriber_receives_each_change() {
        let mut subscribers = ChangeSubscribers::default();
        let first = subscribers.subscribe();
        let second = subscribers.subscribe();

        subscribers.publish(change(MaterialProperty::BumpMap));

        assert_eq!(first.try_recv(), Ok(change(MaterialProperty::BumpMap)));
        assert_eq!(second.try_recv(), Ok(change(MaterialProperty::BumpMap)));
        assert_eq!(first.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut subscribers = ChangeSubscribers::default();
        let kept = subscribers.subscribe();
        drop(subscribers.subscribe());
        assert_eq!(subscribers.len(), 2);

        subscribers.publish(change(MaterialProperty::SpecularPower));

        assert_eq!(subscribers.len(), 1);
        assert_eq!(kept.len(), 1);
    }
}
