//! Rule-based dialogue policy
//!
//! Maps the per-turn dialogue state to the agent's next dialogue acts.
//!
//! ## Precedence
//!
//! ```text
//! 1. restart requested            -> RESTART, ELICIT(slot0)
//! 2. conversation not started     -> WELCOME(new_user, is_bot)
//! 3. ack/unknown after WELCOME    -> ELICIT(slot0)
//! 4. first active state tag whose handler produces acts (`action_table` order)
//! 5. otherwise                    -> CANT_HELP
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

use moviebot_config::{Ontology, PolicySettings};
use moviebot_core::slots::{IS_BOT_SLOT, NEW_USER_SLOT};
use moviebot_core::{
    format_turn, AgentDialogueAct, AgentIntent, DialogueContext, DialogueState, ItemConstraint,
    Item, StateTag, UserIntent,
};

use crate::example_values;
use crate::random::{RandomSource, StdRandom};
use crate::{PolicyError, Result};

/// Handler for one high-level state; an empty result declines the turn
pub type ActionHandler<R> = fn(&DialoguePolicy<R>, &dyn DialogueState) -> Result<Vec<AgentDialogueAct>>;

/// Default cap on distinct example values
pub const DEFAULT_EXAMPLE_LIMIT: usize = 20;

/// Rule-based dialogue policy
///
/// Holds only session-static configuration; every per-turn value is derived
/// from the state passed to [`DialoguePolicy::next_action`].
pub struct DialoguePolicy<R: RandomSource = StdRandom> {
    ontology: Arc<Ontology>,
    is_bot: bool,
    new_user: bool,
    example_limit: usize,
    rng: Mutex<R>,
}

impl DialoguePolicy<StdRandom> {
    /// Create a policy with an entropy-seeded random source
    pub fn new(ontology: Arc<Ontology>, is_bot: bool, new_user: bool) -> Self {
        Self::with_random_source(ontology, is_bot, new_user, StdRandom::new())
    }

    /// Create a policy from settings, validating the ontology
    pub fn from_settings(settings: &PolicySettings, ontology: Arc<Ontology>) -> Result<Self> {
        ontology.validate()?;
        let rng = match settings.random_seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::new(),
        };
        Ok(
            Self::with_random_source(ontology, settings.is_bot, settings.new_user, rng)
                .with_example_limit(settings.example_limit),
        )
    }
}

impl<R: RandomSource> DialoguePolicy<R> {
    /// Create a policy with an explicit random source
    pub fn with_random_source(ontology: Arc<Ontology>, is_bot: bool, new_user: bool, rng: R) -> Self {
        Self {
            ontology,
            is_bot,
            new_user,
            example_limit: DEFAULT_EXAMPLE_LIMIT,
            rng: Mutex::new(rng),
        }
    }

    pub fn with_example_limit(mut self, limit: usize) -> Self {
        self.example_limit = limit;
        self
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    pub fn new_user(&self) -> bool {
        self.new_user
    }

    /// State tags paired with their handlers, highest priority first
    pub fn action_table() -> [(StateTag, ActionHandler<R>); 6] {
        [
            (StateTag::AgentReqFilled, Self::elicit),
            (StateTag::AgentMadePartialOffer, Self::choose_elicit_or_recommend),
            (StateTag::AgentShouldMakeOffer, Self::recommend),
            (StateTag::AgentMadeOffer, Self::inform_or_recommend),
            (StateTag::AgentOfferNoResults, Self::no_results),
            (StateTag::AtTerminalState, Self::finish),
        ]
    }

    /// Decide the agent's next dialogue acts
    pub fn next_action(
        &self,
        state: &dyn DialogueState,
        context: Option<&DialogueContext>,
        restart: bool,
    ) -> Result<Vec<AgentDialogueAct>> {
        tracing::debug!(
            user_acts = %format_turn(state.last_user_dacts()),
            agent_acts = %format_turn(state.last_agent_dacts()),
            recommended = context.map(|c| c.len()).unwrap_or(0),
            restart,
            "Selecting next action"
        );
        self.warn_unknown_slots(state);

        let user_acts = state.last_user_dacts();
        let agent_acts = state.last_agent_dacts();

        if restart || user_acts.iter().any(|a| a.is(UserIntent::Restart)) {
            tracing::info!("Restarting conversation");
            return Ok(vec![
                AgentDialogueAct::new(AgentIntent::Restart),
                self.elicit_first_slot(state)?,
            ]);
        }

        if user_acts.is_empty()
            || agent_acts.is_empty()
            || user_acts.iter().all(|a| a.is(UserIntent::Hi))
        {
            tracing::info!(new_user = self.new_user, is_bot = self.is_bot, "Welcoming user");
            return Ok(vec![AgentDialogueAct::with_params(
                AgentIntent::Welcome,
                vec![
                    ItemConstraint::eq(NEW_USER_SLOT, self.new_user),
                    ItemConstraint::eq(IS_BOT_SLOT, self.is_bot),
                ],
            )]);
        }

        let acknowledged = user_acts
            .iter()
            .any(|a| a.is(UserIntent::Acknowledge) || a.is(UserIntent::Unk));
        let welcomed = agent_acts.iter().any(|a| a.is(AgentIntent::Welcome));
        if acknowledged && welcomed {
            tracing::debug!("Acknowledgement after welcome, starting elicitation");
            return Ok(vec![self.elicit_first_slot(state)?]);
        }

        let active = state.active_states();
        for (tag, handler) in Self::action_table() {
            if !active.contains(&tag) {
                continue;
            }
            let acts = handler(self, state)?;
            if acts.is_empty() {
                tracing::debug!(tag = %tag, "Handler declined, trying next state");
                continue;
            }
            tracing::debug!(tag = %tag, acts = %format_turn(&acts), "Dispatched");
            return Ok(acts);
        }

        tracing::warn!(
            active = ?active.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
            "No state produced an action, falling back to CANT_HELP"
        );
        Ok(vec![AgentDialogueAct::new(AgentIntent::CantHelp)])
    }

    /// Example values of `slot` drawn from `database_result`
    pub fn generate_examples(&self, database_result: &[Item], slot: &str) -> Option<String> {
        let mut rng = self.rng.lock();
        example_values::generate_examples(database_result, slot, self.example_limit, &mut *rng)
    }

    /// Run `f` with exclusive access to the random source
    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut *rng)
    }

    /// `ELICIT(slot0 = "")` for the first requestable slot
    fn elicit_first_slot(&self, state: &dyn DialogueState) -> Result<AgentDialogueAct> {
        let slot = state.agent_requestable().first().ok_or_else(|| {
            PolicyError::Configuration("agent_requestable is empty; nothing to elicit".to_string())
        })?;
        Ok(AgentDialogueAct::with_params(
            AgentIntent::Elicit,
            vec![ItemConstraint::eq(slot.as_str(), "")],
        ))
    }

    fn warn_unknown_slots(&self, state: &dyn DialogueState) {
        for slot in state.frame_cin().slots() {
            if !self.ontology.is_known_slot(slot) {
                tracing::warn!(slot, "CIN slot not in ontology");
            }
        }
    }
}
