//! Action handlers, one per high-level state
//!
//! Each handler reads the state and builds fresh acts. An empty result means
//! the handler declines and the dispatcher moves on to the next active state.

use serde_json::Value;

use moviebot_core::slots::{COUNT_SLOT, DENY_SLOT};
use moviebot_core::{
    AgentDialogueAct, AgentIntent, DialogueState, Item, ItemConstraint, Slot, UserIntent,
};

use crate::policy::DialoguePolicy;
use crate::random::RandomSource;
use crate::{PolicyError, Result};

impl<R: RandomSource> DialoguePolicy<R> {
    /// Ask for more constraints while enough CIN slots are still open
    ///
    /// Emits `COUNT_RESULTS` plus, when a candidate exists, one `ELICIT`.
    /// The title slot is never elicited.
    pub fn elicit(&self, state: &dyn DialogueState) -> Result<Vec<AgentDialogueAct>> {
        let frame = state.frame_cin();
        let mut cin_slots: Vec<&str> = frame
            .unfilled()
            .filter(|slot| *slot != Slot::Title.as_str())
            .collect();

        if cin_slots.len() < state.slot_left_unasked() {
            return Ok(Vec::new());
        }

        let mut acts = vec![AgentDialogueAct::with_params(
            AgentIntent::CountResults,
            vec![ItemConstraint::eq(COUNT_SLOT, state.database_result().len())],
        )];

        let target = if state.agent_req_filled() {
            self.with_rng(|rng| rng.shuffle(&mut cin_slots));
            cin_slots.first().map(|s| s.to_string())
        } else {
            let mut requestable = state.agent_requestable().to_vec();
            self.with_rng(|rng| rng.shuffle(&mut requestable));
            requestable
                .into_iter()
                .find(|slot| frame.is_filled(slot) == Some(false))
        };

        match target {
            Some(slot) => acts.push(AgentDialogueAct::with_params(
                AgentIntent::Elicit,
                vec![ItemConstraint::eq(slot, "")],
            )),
            None => tracing::debug!("No unfilled slot left to elicit"),
        }

        Ok(acts)
    }

    /// Recommend the item in focus, or the top database result
    pub fn recommend(&self, state: &dyn DialogueState) -> Result<Vec<AgentDialogueAct>> {
        let item = if state.agent_should_make_offer() {
            state.item_in_focus().ok_or_else(|| {
                PolicyError::StateInconsistency(
                    "agent_should_make_offer is set but no item is in focus".to_string(),
                )
            })?
        } else {
            state.database_result().first().ok_or_else(|| {
                PolicyError::StateInconsistency(
                    "recommendation requested with an empty database result".to_string(),
                )
            })?
        };

        Ok(vec![AgentDialogueAct::with_params(
            AgentIntent::Recommend,
            vec![ItemConstraint::eq(Slot::Title.as_str(), title_of(item)?)],
        )])
    }

    /// Answer questions about the item in focus, or continue after acceptance
    ///
    /// User acts other than `INQUIRE` and `ACCEPT` produce nothing.
    pub fn inform_or_recommend(&self, state: &dyn DialogueState) -> Result<Vec<AgentDialogueAct>> {
        let mut acts = Vec::new();

        for user_act in state.last_user_dacts() {
            match user_act.intent {
                UserIntent::Inquire => {
                    let item = focused_item(state)?;
                    let title = title_of(item)?;
                    let mut inform = AgentDialogueAct::new(AgentIntent::Inform);

                    for param in &user_act.params {
                        if param.slot == Slot::MoreInfo {
                            inform.push(ItemConstraint::eq(param.slot.as_str(), title.clone()));
                        } else if let Some(value) = item.get(&param.slot) {
                            inform.push(ItemConstraint::eq(param.slot.as_str(), value.clone()));
                        }
                    }
                    if !inform.has_params() {
                        inform.push(ItemConstraint::eq(DENY_SLOT, title));
                    }
                    acts.push(inform);
                },
                UserIntent::Accept => {
                    let title = title_of(focused_item(state)?)?;
                    acts.push(AgentDialogueAct::with_params(
                        AgentIntent::ContinueRecommendation,
                        vec![ItemConstraint::eq(Slot::Title.as_str(), title)],
                    ));
                },
                other => tracing::debug!(intent = %other, "No agent response for user intent"),
            }
        }

        Ok(acts)
    }

    /// Elicit if possible, otherwise recommend
    pub fn choose_elicit_or_recommend(
        &self,
        state: &dyn DialogueState,
    ) -> Result<Vec<AgentDialogueAct>> {
        let acts = self.elicit(state)?;
        if !acts.is_empty() {
            return Ok(acts);
        }
        self.recommend(state)
    }

    pub fn no_results(&self, _state: &dyn DialogueState) -> Result<Vec<AgentDialogueAct>> {
        Ok(vec![AgentDialogueAct::new(AgentIntent::NoResults)])
    }

    pub fn finish(&self, _state: &dyn DialogueState) -> Result<Vec<AgentDialogueAct>> {
        Ok(vec![AgentDialogueAct::new(AgentIntent::Bye)])
    }
}

fn focused_item(state: &dyn DialogueState) -> Result<&Item> {
    state.item_in_focus().ok_or_else(|| {
        PolicyError::StateInconsistency("agent_made_offer is set but no item is in focus".to_string())
    })
}

fn title_of(item: &Item) -> Result<Value> {
    item.title()
        .cloned()
        .ok_or_else(|| PolicyError::StateInconsistency("item has no title".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedOrder, StdRandom};
    use moviebot_config::Ontology;
    use moviebot_core::{DialogueStateSnapshot, Frame, UserDialogueAct};
    use std::sync::Arc;

    fn policy() -> DialoguePolicy<FixedOrder> {
        DialoguePolicy::with_random_source(Arc::new(Ontology::default()), false, true, FixedOrder)
    }

    fn movie(title: &str, year: i64) -> Item {
        Item::from_iter([
            ("title", Value::from(title)),
            ("year", Value::from(year)),
            ("genres", Value::from("drama")),
        ])
    }

    fn state() -> DialogueStateSnapshot {
        DialogueStateSnapshot {
            agent_requestable: vec!["genres".into(), "actors".into(), "year".into()],
            frame_cin: Frame::from_iter([
                ("title", false),
                ("genres", true),
                ("actors", false),
                ("year", false),
            ]),
            slot_left_unasked: 2,
            database_result: vec![movie("Heat", 1995), movie("Ronin", 1998), movie("Collateral", 2004)],
            ..Default::default()
        }
    }

    fn count(n: usize) -> AgentDialogueAct {
        AgentDialogueAct::with_params(
            AgentIntent::CountResults,
            vec![ItemConstraint::eq("count", n)],
        )
    }

    fn elicit(slot: &str) -> AgentDialogueAct {
        AgentDialogueAct::with_params(AgentIntent::Elicit, vec![ItemConstraint::eq(slot, "")])
    }

    #[test]
    fn test_elicit_from_requestable_order() {
        let acts = policy().elicit(&state()).unwrap();
        // genres is filled, so the first unfilled requestable slot is actors
        assert_eq!(acts, vec![count(3), elicit("actors")]);
    }

    #[test]
    fn test_elicit_req_filled_picks_cin_slot() {
        let mut s = state();
        s.agent_req_filled = true;
        let acts = policy().elicit(&s).unwrap();
        assert_eq!(acts, vec![count(3), elicit("actors")]);

        for seed in 0..10 {
            let policy = DialoguePolicy::with_random_source(
                Arc::new(Ontology::default()),
                false,
                true,
                StdRandom::seeded(seed),
            );
            let acts = policy.elicit(&s).unwrap();
            assert_eq!(acts[0], count(3));
            let slot = &acts[1].params[0].slot;
            assert!(slot == "actors" || slot == "year", "unexpected slot {}", slot);
        }
    }

    #[test]
    fn test_elicit_below_threshold_declines() {
        let mut s = state();
        s.slot_left_unasked = 3;
        assert!(policy().elicit(&s).unwrap().is_empty());
    }

    #[test]
    fn test_elicit_never_asks_title() {
        let mut s = state();
        s.frame_cin = Frame::from_iter([("title", false), ("genres", true)]);
        s.slot_left_unasked = 1;
        assert!(policy().elicit(&s).unwrap().is_empty());

        s.slot_left_unasked = 0;
        s.agent_req_filled = true;
        assert_eq!(policy().elicit(&s).unwrap(), vec![count(3)]);
    }

    #[test]
    fn test_elicit_count_only_when_requestable_all_filled() {
        let mut s = state();
        // Open CIN slots exist, but none of them is requestable
        s.frame_cin = Frame::from_iter([
            ("genres", true),
            ("actors", true),
            ("year", true),
            ("plot", false),
            ("keywords", false),
        ]);
        let acts = policy().elicit(&s).unwrap();
        assert_eq!(acts, vec![count(3)]);
    }

    #[test]
    fn test_recommend_first_result() {
        let acts = policy().recommend(&state()).unwrap();
        assert_eq!(
            acts,
            vec![AgentDialogueAct::with_params(
                AgentIntent::Recommend,
                vec![ItemConstraint::eq("title", "Heat")]
            )]
        );
    }

    #[test]
    fn test_recommend_item_in_focus() {
        let mut s = state();
        s.agent_should_make_offer = true;
        s.item_in_focus = Some(movie("Ronin", 1998));
        let acts = policy().recommend(&s).unwrap();
        assert_eq!(acts[0].param("title").unwrap().value, Value::from("Ronin"));
    }

    #[test]
    fn test_recommend_without_results_is_inconsistent() {
        let mut s = state();
        s.database_result.clear();
        assert!(matches!(
            policy().recommend(&s),
            Err(PolicyError::StateInconsistency(_))
        ));

        s.agent_should_make_offer = true;
        assert!(matches!(
            policy().recommend(&s),
            Err(PolicyError::StateInconsistency(_))
        ));
    }

    #[test]
    fn test_inform_copies_requested_slots() {
        let mut s = state();
        s.item_in_focus = Some(movie("Heat", 1995));
        s.last_user_dacts = vec![UserDialogueAct::with_params(
            UserIntent::Inquire,
            vec![ItemConstraint::eq("year", ""), ItemConstraint::eq("more_info", "")],
        )];

        let acts = policy().inform_or_recommend(&s).unwrap();
        assert_eq!(
            acts,
            vec![AgentDialogueAct::with_params(
                AgentIntent::Inform,
                vec![
                    ItemConstraint::eq("year", 1995),
                    ItemConstraint::eq("more_info", "Heat"),
                ]
            )]
        );
    }

    #[test]
    fn test_inform_deny_when_nothing_resolvable() {
        let mut s = state();
        s.item_in_focus = Some(movie("Heat", 1995));
        s.last_user_dacts = vec![UserDialogueAct::with_params(
            UserIntent::Inquire,
            vec![ItemConstraint::eq("budget", "")],
        )];

        let acts = policy().inform_or_recommend(&s).unwrap();
        assert_eq!(
            acts,
            vec![AgentDialogueAct::with_params(
                AgentIntent::Inform,
                vec![ItemConstraint::eq("deny", "Heat")]
            )]
        );
    }

    #[test]
    fn test_accept_continues_and_other_intents_dropped() {
        let mut s = state();
        s.item_in_focus = Some(movie("Heat", 1995));
        s.last_user_dacts = vec![
            UserDialogueAct::new(UserIntent::Reject),
            UserDialogueAct::new(UserIntent::Accept),
            UserDialogueAct::new(UserIntent::Bye),
        ];

        let acts = policy().inform_or_recommend(&s).unwrap();
        assert_eq!(
            acts,
            vec![AgentDialogueAct::with_params(
                AgentIntent::ContinueRecommendation,
                vec![ItemConstraint::eq("title", "Heat")]
            )]
        );

        s.last_user_dacts = vec![UserDialogueAct::new(UserIntent::Reject)];
        assert!(policy().inform_or_recommend(&s).unwrap().is_empty());
    }

    #[test]
    fn test_inquire_without_focus_is_inconsistent() {
        let mut s = state();
        s.last_user_dacts = vec![UserDialogueAct::new(UserIntent::Inquire)];
        assert!(matches!(
            policy().inform_or_recommend(&s),
            Err(PolicyError::StateInconsistency(_))
        ));
    }

    #[test]
    fn test_choose_falls_back_to_recommend() {
        let mut s = state();
        assert_eq!(policy().choose_elicit_or_recommend(&s).unwrap()[0], count(3));

        s.slot_left_unasked = 5;
        let acts = policy().choose_elicit_or_recommend(&s).unwrap();
        assert!(acts[0].is(AgentIntent::Recommend));
    }

    #[test]
    fn test_no_results_and_finish() {
        let s = DialogueStateSnapshot::default();
        assert_eq!(
            policy().no_results(&s).unwrap(),
            vec![AgentDialogueAct::new(AgentIntent::NoResults)]
        );
        assert_eq!(policy().finish(&s).unwrap(), vec![AgentDialogueAct::new(AgentIntent::Bye)]);
    }
}
