//! Automatic fight play: both sides pick their attacks at random

use arena_core::combat::choose_attack_with_rng;
use arena_core::{
    AttackKind, CharacterId, CombatError, Faction, FightEngine, FightId, FightStatus,
    TeamRosterProvider, TurnRequest, TurnView,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Result of an automatically played fight
#[derive(Debug, Default)]
pub struct AutoFight {
    pub fight_id: Option<FightId>,
    pub turns: u32,
    pub ultimates: u32,
    pub total_damage: f64,
    pub winner: Option<Faction>,
    pub log: Vec<String>,
}

impl AutoFight {
    fn record(&mut self, view: &TurnView) {
        let turn = view.turn();
        self.fight_id = Some(view.fight_id());
        self.turns += 1;
        self.total_damage += turn.damage_dealt;
        if turn.attack_kind == AttackKind::Ultimate {
            self.ultimates += 1;
        }
        self.log.push(turn.log_line());
        if let FightStatus::Concluded { winner } = view.status() {
            self.winner = Some(winner);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Average damage per turn
    pub fn avg_damage(&self) -> f64 {
        if self.turns > 0 {
            self.total_damage / self.turns as f64
        } else {
            0.0
        }
    }
}

/// Play a duel between `a` and `b` until one falls or `max_turns` is reached
///
/// `a` strikes first and the two alternate.
pub fn play_duel(
    engine: &FightEngine,
    a: CharacterId,
    b: CharacterId,
    creator: Option<&str>,
    max_turns: u32,
    rng: &mut impl Rng,
) -> Result<AutoFight, CombatError> {
    let mut result = AutoFight::default();
    let (mut attacker, mut defender) = (a, b);
    let mut ultimate_ready = false;

    while result.turns < max_turns && !result.is_finished() {
        let kind = choose_attack_with_rng(rng, ultimate_ready);
        let request = match result.fight_id {
            Some(id) => TurnRequest::continue_fight(id, attacker, defender, kind),
            None => with_creator(TurnRequest::start_duel(a, b, attacker, defender, kind), creator),
        };
        let view = engine.take_turn(&request)?;
        result.record(&view);

        std::mem::swap(&mut attacker, &mut defender);
        ultimate_ready = is_ultimate_ready(&view, attacker);
    }

    debug!(turns = result.turns, winner = ?result.winner, "duel finished");
    Ok(result)
}

/// Play a team battle until one side is wiped out or `max_turns` is reached
///
/// Sides alternate, heroes first. Each side rotates through its standing
/// members and strikes a random standing opponent.
pub fn play_team_battle(
    engine: &FightEngine,
    teams: &dyn TeamRosterProvider,
    hero_team: &str,
    villain_team: &str,
    creator: Option<&str>,
    max_turns: u32,
    rng: &mut impl Rng,
) -> Result<AutoFight, CombatError> {
    let size = engine.constants().teams.size;
    let heroes = team_ids(teams, hero_team, Faction::Hero, size)?;
    let villains = team_ids(teams, villain_team, Faction::Villain, size)?;

    let mut result = AutoFight::default();
    let mut standing: Vec<CharacterId> = heroes.iter().chain(villains.iter()).copied().collect();
    let mut ready: Vec<CharacterId> = Vec::new();
    let mut cursors = [0usize; 2];

    while result.turns < max_turns && !result.is_finished() {
        let side = (result.turns % 2) as usize;
        let (own, enemies) = if side == 0 {
            (&heroes, &villains)
        } else {
            (&villains, &heroes)
        };

        let own_standing: Vec<CharacterId> =
            own.iter().copied().filter(|id| standing.contains(id)).collect();
        let targets: Vec<CharacterId> =
            enemies.iter().copied().filter(|id| standing.contains(id)).collect();
        let Some(&defender) = targets.choose(rng) else {
            break;
        };
        let attacker = match own_standing.len() {
            0 => break,
            n => own_standing[cursors[side] % n],
        };
        cursors[side] += 1;

        let kind = choose_attack_with_rng(rng, ready.contains(&attacker));
        let request = match result.fight_id {
            Some(id) => TurnRequest::continue_fight(id, attacker, defender, kind),
            None => with_creator(
                TurnRequest::start_team_battle(hero_team, villain_team, attacker, defender, kind),
                creator,
            ),
        };
        let view = engine.take_turn(&request)?;
        result.record(&view);

        standing = view
            .participants()
            .into_iter()
            .filter(|p| p.health > 0.0)
            .map(|p| p.id)
            .collect();
        ready = view
            .participants()
            .into_iter()
            .filter(|p| p.ultimate_available)
            .map(|p| p.id)
            .collect();
    }

    debug!(turns = result.turns, winner = ?result.winner, "team battle finished");
    Ok(result)
}

fn with_creator(request: TurnRequest, creator: Option<&str>) -> TurnRequest {
    match creator {
        Some(creator) => request.with_creator(creator),
        None => request,
    }
}

fn is_ultimate_ready(view: &TurnView, id: CharacterId) -> bool {
    view.participants()
        .into_iter()
        .any(|p| p.id == id && p.ultimate_available)
}

fn team_ids(
    teams: &dyn TeamRosterProvider,
    team: &str,
    faction: Faction,
    size: usize,
) -> Result<Vec<CharacterId>, CombatError> {
    let members = teams.team_members(team, faction)?;
    if members.len() < size {
        return Err(CombatError::InvalidTeamComposition {
            team: team.to_string(),
            faction,
            found: members.len(),
            required: size,
        });
    }
    Ok(members.into_iter().take(size).map(|c| c.id).collect())
}
