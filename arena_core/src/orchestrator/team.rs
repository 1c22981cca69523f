//! Team battles: fixed-size rosters with per-character targeting

use super::{resolve_turn, FightEngine, TeamView, TurnRequest};
use crate::error::CombatError;
use crate::roster::Character;
use crate::session::{FightMode, FightSession, TeamBattle, TeamRoster, TurnSummary};
use crate::snapshot::CharacterSnapshot;
use crate::types::{AttackKind, CharacterId, Faction, FightId};
use std::collections::BTreeMap;

const MODE: &str = "team_battle";

impl FightEngine {
    /// Resolve one turn of a team battle, starting the battle if needed
    pub fn team_turn(&self, request: &TurnRequest) -> Result<TeamView, CombatError> {
        let kind = request.attack_kind()?;
        match request.fight_id {
            Some(id) => self.continue_team_battle(id, request, kind),
            None => self.start_team_battle(request, kind),
        }
    }

    fn start_team_battle(
        &self,
        request: &TurnRequest,
        kind: AttackKind,
    ) -> Result<TeamView, CombatError> {
        let (Some(hero_team), Some(villain_team)) = (&request.hero_team, &request.villain_team)
        else {
            return Err(CombatError::invalid_participant(
                "hero_team and villain_team are required to start a team battle",
            ));
        };

        let heroes = self.pick_team(hero_team, Faction::Hero)?;
        let villains = self.pick_team(villain_team, Faction::Villain)?;

        let threshold = self.constants.ultimate.team_threshold;
        let mut fighters = BTreeMap::new();
        for character in heroes.iter().chain(villains.iter()) {
            let snapshot = CharacterSnapshot::from_character(character, threshold, &self.constants)?;
            fighters.insert(snapshot.id, snapshot);
        }

        let battle = TeamBattle {
            heroes: TeamRoster {
                team: hero_team.clone(),
                faction: Faction::Hero,
                members: heroes.iter().map(|c| c.id).collect(),
            },
            villains: TeamRoster {
                team: villain_team.clone(),
                faction: Faction::Villain,
                members: villains.iter().map(|c| c.id).collect(),
            },
            fighters,
        };

        let mut session = FightSession::new(FightMode::TeamBattle(battle), request.creator.clone());
        let summary = self.apply_team_turn(&mut session, request, kind)?;
        let session = self.create(session)?;
        team_view(&session, summary, false)
    }

    fn continue_team_battle(
        &self,
        id: FightId,
        request: &TurnRequest,
        kind: AttackKind,
    ) -> Result<TeamView, CombatError> {
        self.with_fight_locked(id, || {
            let mut session = self.load(id)?;
            if let Some(summary) = self.prepare_continue(&session, request, MODE)? {
                return team_view(&session, summary, true);
            }

            let summary = self.apply_team_turn(&mut session, request, kind)?;
            self.commit(&mut session)?;
            team_view(&session, summary, false)
        })
    }

    /// The first `teams.size` members of `team` with the given faction
    fn pick_team(&self, team: &str, faction: Faction) -> Result<Vec<Character>, CombatError> {
        let required = self.constants.teams.size;
        let members = self.teams.team_members(team, faction)?;
        if members.len() < required {
            return Err(CombatError::InvalidTeamComposition {
                team: team.to_string(),
                faction,
                found: members.len(),
                required,
            });
        }
        Ok(members.into_iter().take(required).collect())
    }

    fn apply_team_turn(
        &self,
        session: &mut FightSession,
        request: &TurnRequest,
        kind: AttackKind,
    ) -> Result<TurnSummary, CombatError> {
        let FightMode::TeamBattle(battle) = &mut session.mode else {
            return Err(CombatError::WrongFightMode {
                fight_id: session.id,
                expected: MODE,
            });
        };

        if request.attacker_id == request.defender_id {
            return Err(CombatError::invalid_participant(format!(
                "character {} cannot attack itself",
                request.attacker_id
            )));
        }
        let lookup = |id: CharacterId| {
            battle.fighter(id).cloned().ok_or_else(|| {
                CombatError::invalid_participant(format!("character {} is not in this battle", id))
            })
        };
        let mut attacker = lookup(request.attacker_id)?;
        let mut defender = lookup(request.defender_id)?;

        let summary = resolve_turn(&mut attacker, &mut defender, kind, &self.constants)?;
        battle.fighters.insert(attacker.id, attacker);
        battle.fighters.insert(defender.id, defender);

        session.record_turn(&summary, request.request_id.as_deref());
        session.refresh_status();
        Ok(summary)
    }
}

fn team_view(
    session: &FightSession,
    turn: TurnSummary,
    replayed: bool,
) -> Result<TeamView, CombatError> {
    let FightMode::TeamBattle(battle) = &session.mode else {
        return Err(CombatError::WrongFightMode {
            fight_id: session.id,
            expected: MODE,
        });
    };

    Ok(TeamView {
        fight_id: session.id,
        status: session.status,
        hero_team: battle.heroes.team.clone(),
        heroes: battle.side(&battle.heroes).into_iter().map(|s| s.view()).collect(),
        villain_team: battle.villains.team.clone(),
        villains: battle.side(&battle.villains).into_iter().map(|s| s.view()).collect(),
        turn,
        turn_count: session.turn_log.len(),
        replayed,
    })
}
