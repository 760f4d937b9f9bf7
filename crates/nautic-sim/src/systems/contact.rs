//! Contact system: finds what the submarine is touching and applies the
//! one-shot effect of each mine, bubble or fish.
//!
//! Hits from the engine's own overlap pass and from a host physics callback
//! both go through [`resolve`], so each activation triggers at most once no
//! matter how many times it is reported.

use hecs::{Entity, World};

use nautic_core::components::{
    AirPocket, Collider, Expiry, MineCharge, Pooled, Position, Wander,
};
use nautic_core::config::GameConfig;
use nautic_core::enums::EntityKind;
use nautic_core::events::GameEvent;
use nautic_logic::hud::Hud;
use nautic_logic::vitals::VitalState;

use crate::pool::{EntityPool, ObjectPool};

/// Collect every live trigger overlapping the submarine into `hits`.
pub fn detect(world: &World, submarine: Entity, hits: &mut Vec<Entity>) {
    hits.clear();
    let Ok(mut sub) = world.query_one::<(&Position, &Collider)>(submarine) else {
        return;
    };
    let Some((sub_pos, sub_collider)) = sub.get().map(|(p, c)| (p.0, *c)) else {
        return;
    };
    if !sub_collider.enabled {
        return;
    }

    for (entity, (pos, collider, pooled)) in world
        .query::<(&Position, &Collider, Option<&Pooled>)>()
        .iter()
    {
        if entity == submarine || !collider.enabled {
            continue;
        }
        if pooled.is_some_and(|p| !p.active) {
            continue;
        }
        if pos.0.distance(sub_pos) <= sub_collider.radius + collider.radius {
            hits.push(entity);
        }
    }
}

/// Apply the effect of `other` touching the submarine. Returns whether
/// anything happened.
pub fn resolve(
    world: &mut World,
    pool: &mut EntityPool,
    vitals: &mut VitalState,
    hud: &mut Hud,
    config: &GameConfig,
    other: Entity,
) -> bool {
    let Ok(kind) = world.get::<&EntityKind>(other).map(|k| *k) else {
        return false;
    };
    match kind {
        EntityKind::Mine => detonate_mine(world, pool, vitals, hud, config, other),
        EntityKind::AirBubble => pop_bubble(world, pool, vitals, hud, config, other),
        EntityKind::Fish => collect_fish(world, hud, config, other),
        EntityKind::Submarine => false,
    }
}

fn detonate_mine(
    world: &mut World,
    pool: &mut EntityPool,
    vitals: &mut VitalState,
    hud: &mut Hud,
    config: &GameConfig,
    mine: Entity,
) -> bool {
    let Ok((charge, collider, pooled)) =
        world.query_one_mut::<(&mut MineCharge, &mut Collider, &Pooled)>(mine)
    else {
        return false;
    };
    if charge.triggered || !pooled.active {
        return false;
    }
    charge.triggered = true;
    collider.enabled = false;
    let (damage, penalty) = (charge.damage, charge.time_penalty);

    log::debug!("mine {:?} detonated for {damage}", mine);
    hud.push_game_event(GameEvent::MineDetonated { damage });
    hud.play_sound(config.mines.explosion.sound.as_ref());
    vitals.take_damage(damage, hud);
    if penalty != 0.0 {
        vitals.add_time(-penalty, hud);
    }

    schedule_return(world, pool, EntityKind::Mine, mine, config.mines.explosion.linger_secs());
    true
}

fn pop_bubble(
    world: &mut World,
    pool: &mut EntityPool,
    vitals: &mut VitalState,
    hud: &mut Hud,
    config: &GameConfig,
    bubble: Entity,
) -> bool {
    let Ok((pocket, collider, pooled)) =
        world.query_one_mut::<(&mut AirPocket, &mut Collider, &Pooled)>(bubble)
    else {
        return false;
    };
    if pocket.triggered || !pooled.active {
        return false;
    }
    pocket.triggered = true;
    collider.enabled = false;
    let time_bonus = pocket.time_bonus;

    log::debug!("bubble {:?} popped for {time_bonus}s", bubble);
    hud.push_game_event(GameEvent::BubblePopped { time_bonus });
    hud.play_sound(config.bubbles.pop.sound.as_ref());
    vitals.add_time(time_bonus, hud);

    schedule_return(world, pool, EntityKind::AirBubble, bubble, config.bubbles.pop.linger_secs());
    true
}

fn collect_fish(world: &mut World, hud: &mut Hud, config: &GameConfig, fish: Entity) -> bool {
    let Ok((wander, collider)) = world.query_one_mut::<(&mut Wander, &mut Collider)>(fish) else {
        return false;
    };
    if wander.collected {
        return false;
    }
    wander.collected = true;
    wander.visible = false;
    collider.enabled = false;

    hud.play_sound(config.fish.collect_sound.as_ref());
    hud.increment_fish_count();

    let linger = config
        .fish
        .collect_sound
        .as_ref()
        .map_or(0.0, |clip| clip.length_secs.max(0.0));
    let _ = world.insert_one(fish, Expiry { remaining_secs: linger });
    true
}

/// Hand the entity back after the effect has played, or right away when
/// there is nothing to play.
fn schedule_return(
    world: &mut World,
    pool: &mut EntityPool,
    kind: EntityKind,
    entity: Entity,
    linger_secs: Option<f32>,
) {
    match linger_secs {
        Some(secs) => {
            let _ = world.insert_one(entity, Expiry { remaining_secs: secs });
        }
        None => pool.return_to_pool(world, kind, entity),
    }
}
