//! World aggregate and per-entity update passes
//!
//! A World is rebuilt wholesale from level data on every load. The hero is the
//! only entity carried across loads. Entities are only inserted here at build
//! time and only removed by the update passes below, which mark first and
//! drop afterwards so no entity is skipped or visited twice within a pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{Axis, at_ledge, overlapping, overlaps_any, resolve_axis_move};
use super::entity::{
    Currency, CurrencyKind, Enemy, EnemyKind, Goal, GoalKind, Hero, Platform, PlatformKind,
};
use crate::consts::LEDGE_PROBE;
use crate::level::{LevelData, TilePos};
use crate::tiles_to_world;

/// What happened to the hero during one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroReport {
    /// Currency collected this tick, in pickup order
    pub pickups: Vec<CurrencyKind>,
    /// A heart was lost to enemy contact
    pub hurt: bool,
    /// Hearts reached zero this tick
    pub died: bool,
    /// The hero dropped below the bottom of the world
    pub fell: bool,
    /// The hero overlaps a goal marker after moving
    pub reached_goal: bool,
}

/// Everything that exists in the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub hero: Hero,
    pub platforms: Vec<Platform>,
    pub currencies: Vec<Currency>,
    pub enemies: Vec<Enemy>,
    pub goals: Vec<Goal>,
    /// World size in world units
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    next_id: u32,
}

impl World {
    /// Build a world from validated level data, placing `hero` at the start tile
    pub fn from_level(level: &LevelData, mut hero: Hero) -> Self {
        let TilePos(start_x, start_y) = level.start;
        hero.move_to(start_x, start_y);
        hero.body.vel = Vec2::ZERO;
        hero.jumping = false;

        let mut world = Self {
            hero,
            platforms: Vec::new(),
            currencies: Vec::new(),
            enemies: Vec::new(),
            goals: Vec::new(),
            width: tiles_to_world(level.width.max(1) as u32),
            height: tiles_to_world(level.height.max(1) as u32),
            gravity: level.gravity,
            terminal_velocity: level.terminal_velocity,
            next_id: 1,
        };

        for (i, &TilePos(x, y)) in level.flag_locs.iter().enumerate() {
            let kind = if i == 0 { GoalKind::DoorTop } else { GoalKind::Door };
            let id = world.next_entity_id();
            world.goals.push(Goal::spawn(id, kind, x, y));
        }

        let platform_groups = [
            (PlatformKind::Grass, &level.grass_locs),
            (PlatformKind::Block, &level.block_locs),
            (PlatformKind::Dirt, &level.dirt_locs),
        ];
        for (kind, tiles) in platform_groups {
            for &TilePos(x, y) in tiles {
                let id = world.next_entity_id();
                world.platforms.push(Platform::spawn(id, kind, x, y));
            }
        }

        let currency_groups = [
            (CurrencyKind::Gold, &level.gold_locs),
            (CurrencyKind::Bronze, &level.bronze_locs),
        ];
        for (kind, tiles) in currency_groups {
            for &TilePos(x, y) in tiles {
                let id = world.next_entity_id();
                world.currencies.push(Currency::spawn(id, kind, x, y));
            }
        }

        let enemy_groups = [
            (EnemyKind::Patroller, &level.spikeman_locs),
            (EnemyKind::Flyer, &level.flyman_locs),
        ];
        for (kind, tiles) in enemy_groups {
            for &TilePos(x, y) in tiles {
                let id = world.next_entity_id();
                world.enemies.push(Enemy::spawn(id, kind, x, y));
            }
        }

        log::info!(
            "World built: {}x{} units, {} platforms, {} coins, {} enemies, {} goals",
            world.width,
            world.height,
            world.platforms.len(),
            world.currencies.len(),
            world.enemies.len(),
            world.goals.len()
        );

        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance every entity by one tick: hero first, then enemies
    pub fn step(&mut self) -> HeroReport {
        let report = self.update_hero();
        self.update_enemies();
        report
    }

    /// One hero tick: gravity, world edges, pickups, enemy contact, platform
    /// collision, goal check, animation
    pub fn update_hero(&mut self) -> HeroReport {
        let mut report = HeroReport::default();
        let hero = &mut self.hero;
        if !hero.is_alive() {
            return report;
        }

        hero.body.apply_gravity(self.gravity, self.terminal_velocity);

        if hero.body.left() < 0.0 {
            hero.body.set_left(0.0);
        } else if hero.body.right() > self.width {
            hero.body.set_right(self.width);
        }
        if hero.body.top() > self.height {
            hero.hearts = 0;
            report.fell = true;
            report.died = true;
            log::info!("Hero fell out of the world");
            return report;
        }

        // Pickups: split first, then apply, so each coin counts once
        let (taken, kept): (Vec<Currency>, Vec<Currency>) = std::mem::take(&mut self.currencies)
            .into_iter()
            .partition(|coin| coin.body.overlaps(&hero.body));
        self.currencies = kept;
        for coin in taken {
            hero.collect(coin.kind);
            log::debug!("Picked up {:?} #{} (score {})", coin.kind, coin.id, hero.score);
            report.pickups.push(coin.kind);
        }

        // A hit costs a heart and overwrites velocity; the cooldown gates both
        for i in overlapping(&hero.body, &self.enemies) {
            if !hero.hurt() {
                continue;
            }
            report.hurt = true;
            log::debug!("Hero hit by enemy #{}, hearts = {}", self.enemies[i].id, hero.hearts);
            hero.knock_back_from(&self.enemies[i].body, self.terminal_velocity);
            if !hero.is_alive() {
                report.died = true;
                log::info!("Hero killed by enemy #{}", self.enemies[i].id);
                return report;
            }
        }
        hero.tick_cooldown();

        move_hero(hero, &self.platforms);

        report.reached_goal = overlaps_any(&hero.body, &self.goals);
        hero.animate();
        report
    }

    /// One tick for every enemy; enemies that left the world are dropped
    pub fn update_enemies(&mut self) {
        for enemy in &mut self.enemies {
            match enemy.kind {
                EnemyKind::Patroller => {
                    update_patroller(
                        enemy,
                        &self.platforms,
                        self.width,
                        self.gravity,
                        self.terminal_velocity,
                    );
                    if enemy.body.top() > self.height {
                        enemy.alive = false;
                    }
                }
                EnemyKind::Flyer => {
                    update_flyer(enemy, self.width);
                    if is_outside(&enemy.body, self.width, self.height) {
                        enemy.alive = false;
                    }
                }
            }
            if enemy.alive {
                enemy.animate();
            } else {
                log::debug!("{:?} #{} left the world", enemy.kind, enemy.id);
            }
        }
        self.enemies.retain(|e| e.alive);
    }
}

/// Resolve hero movement against platforms, x then y
fn move_hero(hero: &mut Hero, platforms: &[Platform]) {
    let horizontal = resolve_axis_move(hero.body, Axis::Horizontal, hero.body.vel.x, platforms);
    hero.body = horizontal.body;

    let vy = hero.body.vel.y;
    let vertical = resolve_axis_move(hero.body, Axis::Vertical, vy, platforms);
    hero.body = vertical.body;
    if vertical.collided() {
        if vy > 0.0 {
            hero.jumping = false;
        }
        hero.body.vel.y = 0.0;
    }
}

fn update_patroller(
    enemy: &mut Enemy,
    platforms: &[Platform],
    world_width: f32,
    gravity: f32,
    terminal_velocity: f32,
) {
    enemy.body.apply_gravity(gravity, terminal_velocity);

    let horizontal = resolve_axis_move(enemy.body, Axis::Horizontal, enemy.body.vel.x, platforms);
    enemy.body = horizontal.body;
    if horizontal.collided() {
        enemy.reverse();
    }

    let vertical = resolve_axis_move(enemy.body, Axis::Vertical, enemy.body.vel.y, platforms);
    enemy.body = vertical.body;
    if vertical.collided() {
        enemy.body.vel.y = 0.0;
    }

    // Edge clamp comes after the move so a clamp never fights the ledge probe
    bounce_off_world_edges(enemy, world_width);
    if at_ledge(&enemy.body, enemy.body.vel.x, LEDGE_PROBE, platforms) {
        enemy.reverse();
    }
}

/// Flyers pass through platforms and only turn at the world edges
fn update_flyer(enemy: &mut Enemy, world_width: f32) {
    enemy.body.pos += enemy.body.vel;
    bounce_off_world_edges(enemy, world_width);
}

fn bounce_off_world_edges(enemy: &mut Enemy, world_width: f32) {
    if enemy.body.left() < 0.0 {
        enemy.body.set_left(0.0);
        enemy.reverse();
    } else if enemy.body.right() > world_width {
        enemy.body.set_right(world_width);
        enemy.reverse();
    }
}

fn is_outside(body: &Body, width: f32, height: f32) -> bool {
    body.right() < 0.0 || body.left() > width || body.bottom() < 0.0 || body.top() > height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::level::TilePos;
    use proptest::prelude::*;

    fn level(width: i32, height: i32) -> LevelData {
        LevelData {
            width,
            height,
            start: TilePos(0, 0),
            flag_locs: vec![TilePos(width - 1, 0)],
            grass_locs: Vec::new(),
            block_locs: Vec::new(),
            dirt_locs: Vec::new(),
            gold_locs: Vec::new(),
            bronze_locs: Vec::new(),
            spikeman_locs: Vec::new(),
            flyman_locs: Vec::new(),
            gravity: 0.5,
            terminal_velocity: 12.0,
        }
    }

    fn row(y: i32, xs: std::ops::RangeInclusive<i32>) -> Vec<TilePos> {
        xs.map(|x| TilePos(x, y)).collect()
    }

    #[test]
    fn test_build_from_level() {
        let mut data = level(12, 6);
        data.flag_locs = vec![TilePos(11, 3), TilePos(11, 4)];
        data.grass_locs = row(5, 0..=3);
        data.dirt_locs = vec![TilePos(4, 5)];
        data.gold_locs = vec![TilePos(2, 2)];
        data.bronze_locs = vec![TilePos(3, 2)];
        data.spikeman_locs = vec![TilePos(1, 4)];
        data.flyman_locs = vec![TilePos(6, 1)];
        data.start = TilePos(1, 3);

        let world = World::from_level(&data, Hero::new());
        assert_eq!(world.width, 12.0 * GRID_SIZE);
        assert_eq!(world.height, 6.0 * GRID_SIZE);
        assert_eq!(world.platforms.len(), 5);
        assert_eq!(world.platforms[4].kind, PlatformKind::Dirt);
        assert_eq!(world.currencies.len(), 2);
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.goals[0].kind, GoalKind::DoorTop);
        assert_eq!(world.goals[1].kind, GoalKind::Door);
        assert_eq!(world.hero.body.center(), crate::tile_center(1, 3));

        // IDs are unique and increasing in build order
        let mut ids: Vec<u32> = world.goals.iter().map(|g| g.id).collect();
        ids.extend(world.platforms.iter().map(|p| p.id));
        ids.extend(world.currencies.iter().map(|c| c.id));
        ids.extend(world.enemies.iter().map(|e| e.id));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_hero_lands_on_platform() {
        let mut data = level(8, 5);
        data.grass_locs = row(3, 0..=5);
        let mut world = World::from_level(&data, Hero::new());
        let floor = 3.0 * GRID_SIZE;

        let bound = (data.terminal_velocity / data.gravity).ceil() as usize + 5;
        let mut landed_at = None;
        for t in 0..bound {
            world.step();
            if world.hero.body.bottom() == floor && world.hero.body.vel.y == 0.0 {
                landed_at = Some(t);
                break;
            }
        }
        assert!(landed_at.is_some(), "hero never came to rest");
        assert_eq!(world.hero.body.bottom(), world.platforms[0].body.top());

        // Stays at rest
        for _ in 0..30 {
            world.step();
        }
        assert_eq!(world.hero.body.bottom(), floor);
        assert_eq!(world.hero.body.vel.y, 0.0);
    }

    #[test]
    fn test_hero_walks_into_wall() {
        let mut data = level(8, 4);
        data.grass_locs = row(2, 0..=7);
        data.block_locs = vec![TilePos(3, 1)];
        data.start = TilePos(1, 1);
        let mut world = World::from_level(&data, Hero::new());

        for _ in 0..60 {
            world.hero.move_right();
            world.step();
        }
        let wall = world.platforms.iter().find(|p| p.kind == PlatformKind::Block).unwrap();
        assert_eq!(world.hero.body.right(), wall.body.left());
        assert!(!world.hero.body.overlaps(&wall.body));
        // Velocity survives the clamp
        assert_eq!(world.hero.body.vel.x, HERO_SPEED);
    }

    #[test]
    fn test_world_edges_block_hero() {
        let mut data = level(4, 4);
        data.grass_locs = row(3, 0..=3);
        data.start = TilePos(0, 2);
        let mut world = World::from_level(&data, Hero::new());

        for _ in 0..30 {
            world.hero.move_left();
            world.step();
        }
        assert!(world.hero.body.left() >= -HERO_SPEED);
        world.hero.stop();
        world.step();
        assert_eq!(world.hero.body.left(), 0.0);

        for _ in 0..120 {
            world.hero.move_right();
            world.step();
        }
        world.hero.stop();
        world.step();
        assert_eq!(world.hero.body.right(), world.width);
    }

    #[test]
    fn test_falling_out_is_fatal() {
        let data = level(4, 2);
        let mut world = World::from_level(&data, Hero::new());

        let mut report = HeroReport::default();
        for _ in 0..200 {
            report = world.step();
            if report.fell {
                break;
            }
        }
        assert!(report.fell);
        assert!(report.died);
        assert_eq!(world.hero.hearts, 0);
    }

    #[test]
    fn test_pickup_is_exactly_once() {
        let mut data = level(6, 3);
        data.grass_locs = row(1, 0..=5);
        data.gold_locs = vec![TilePos(0, 0)];
        data.bronze_locs = vec![TilePos(0, 0)];
        let mut world = World::from_level(&data, Hero::new());

        let report = world.step();
        assert_eq!(report.pickups, vec![CurrencyKind::Gold, CurrencyKind::Bronze]);
        assert!(world.currencies.is_empty());
        assert_eq!(world.hero.score, GOLD_POINTS + BRONZE_POINTS);

        for _ in 0..10 {
            let report = world.step();
            assert!(report.pickups.is_empty());
        }
        assert_eq!(world.hero.gold_coins, 1);
        assert_eq!(world.hero.bronze_coins, 1);
        assert_eq!(world.hero.score, GOLD_POINTS + BRONZE_POINTS);
    }

    #[test]
    fn test_continuous_contact_costs_one_heart() {
        let mut data = level(6, 3);
        data.grass_locs = row(1, 0..=5);
        let mut world = World::from_level(&data, Hero::new());
        let mut enemy = Enemy::spawn(99, EnemyKind::Flyer, 0, 0);
        enemy.body.vel = Vec2::ZERO;
        world.enemies.push(enemy);

        let mut hits = 0;
        for _ in 0..5 {
            // Pin the hero onto the enemy so contact is continuous
            world.hero.move_to(0, 0);
            world.enemies[0].body.set_center(crate::tile_center(0, 0));
            if world.update_hero().hurt {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(world.hero.hearts, HERO_MAX_HEARTS - 1);
        assert_eq!(world.hero.hurt_cooldown, HURT_COOLDOWN_TICKS - 5);
    }

    #[test]
    fn test_knockback_only_with_a_hit() {
        let mut data = level(6, 3);
        data.grass_locs = row(1, 0..=5);
        data.start = TilePos(1, 0);
        let mut world = World::from_level(&data, Hero::new());
        let mut enemy = Enemy::spawn(99, EnemyKind::Flyer, 1, 0);
        enemy.body.vel = Vec2::ZERO;
        enemy.body.pos.x += 20.0;
        world.enemies.push(enemy);

        assert!(world.update_hero().hurt);
        assert_eq!(world.hero.body.vel.x, -KNOCKBACK_SPEED);

        // Still touching during the cooldown: input velocity is left alone
        world.hero.move_to(1, 0);
        world.hero.body.vel.x = 3.0;
        assert!(!world.update_hero().hurt);
        assert_eq!(world.hero.body.vel.x, 3.0);
    }

    #[test]
    fn test_knockback_capped_by_slow_terminal_velocity() {
        let mut data = level(6, 4);
        data.terminal_velocity = 3.0;
        data.grass_locs = row(3, 0..=5);
        data.start = TilePos(1, 1);
        let mut world = World::from_level(&data, Hero::new());
        let mut enemy = Enemy::spawn(99, EnemyKind::Flyer, 1, 1);
        enemy.body.vel = Vec2::ZERO;
        enemy.body.pos += Vec2::new(10.0, 10.0);
        world.enemies.push(enemy);

        assert!(world.step().hurt);
        assert_eq!(world.hero.body.vel.y, -3.0);
        assert!(world.hero.body.vel.y.abs() <= data.terminal_velocity);
    }

    #[test]
    fn test_enemy_contact_can_kill() {
        let mut data = level(6, 3);
        data.grass_locs = row(1, 0..=5);
        let mut world = World::from_level(&data, Hero::new());
        world.hero.hearts = 1;
        world.enemies.push(Enemy::spawn(99, EnemyKind::Flyer, 0, 0));

        let report = world.update_hero();
        assert!(report.hurt);
        assert!(report.died);
        assert!(!world.hero.is_alive());

        // Dead hero no longer moves
        let before = world.hero.body;
        world.update_hero();
        assert_eq!(world.hero.body, before);
    }

    #[test]
    fn test_patroller_turns_at_ledge() {
        let mut data = level(12, 4);
        data.grass_locs = row(1, 0..=4);
        data.spikeman_locs = vec![TilePos(2, 0)];
        let mut world = World::from_level(&data, Hero::new());
        // Keep the hero out of the way
        world.hero.move_to(10, 0);
        world.hero.hearts = 0;

        let ledge_right = 5.0 * GRID_SIZE;
        let mut saw_right = false;
        let mut flips_on_right = 0;
        let mut last_vx = world.enemies[0].body.vel.x;
        for _ in 0..600 {
            world.step();
            assert_eq!(world.enemies.len(), 1, "patroller fell off");
            let slime = &world.enemies[0];
            assert!(slime.body.right() <= ledge_right + PATROLLER_SPEED);
            assert!(slime.body.left() >= 0.0);
            if slime.body.vel.x > 0.0 {
                saw_right = true;
            }
            if last_vx > 0.0 && slime.body.vel.x < 0.0 {
                flips_on_right += 1;
            }
            last_vx = slime.body.vel.x;
        }
        assert!(saw_right);
        assert!(flips_on_right >= 1);
        assert_eq!(world.enemies[0].body.bottom(), GRID_SIZE);
    }

    #[test]
    fn test_patroller_reverses_at_wall() {
        let mut data = level(12, 4);
        data.grass_locs = row(2, 0..=11);
        data.block_locs = vec![TilePos(1, 1)];
        data.spikeman_locs = vec![TilePos(3, 1)];
        let mut world = World::from_level(&data, Hero::new());
        world.hero.move_to(11, 1);
        world.hero.hearts = 0;

        // Let it land, then send it toward the wall
        for _ in 0..20 {
            world.step();
        }
        assert_eq!(world.enemies[0].body.bottom(), 2.0 * GRID_SIZE);
        world.enemies[0].body.vel.x = -PATROLLER_SPEED;

        let mut reversed = false;
        for _ in 0..120 {
            world.step();
            let slime = &world.enemies[0];
            assert!(slime.body.left() >= 2.0 * GRID_SIZE);
            if slime.body.vel.x > 0.0 {
                reversed = true;
                break;
            }
        }
        assert!(reversed);
    }

    #[test]
    fn test_patroller_removed_below_world() {
        let mut data = level(6, 2);
        data.spikeman_locs = vec![TilePos(3, 0)];
        let mut world = World::from_level(&data, Hero::new());
        world.hero.hearts = 0;

        for _ in 0..200 {
            world.step();
        }
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_flyer_ignores_platforms_and_turns_at_edges() {
        let mut data = level(6, 3);
        data.block_locs = vec![TilePos(1, 1)];
        data.flyman_locs = vec![TilePos(1, 1)];
        let mut world = World::from_level(&data, Hero::new());
        world.hero.hearts = 0;
        let y = world.enemies[0].body.pos.y;

        let mut turned = false;
        for _ in 0..200 {
            world.step();
            let flyer = &world.enemies[0];
            assert_eq!(flyer.body.pos.y, y);
            if flyer.body.vel.x > 0.0 {
                turned = true;
            }
        }
        assert!(turned);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_goal_reported() {
        let mut data = level(4, 3);
        data.grass_locs = row(1, 0..=3);
        data.flag_locs = vec![TilePos(1, 0)];
        let mut world = World::from_level(&data, Hero::new());

        let mut reached = false;
        for _ in 0..40 {
            world.hero.move_right();
            if world.step().reached_goal {
                reached = true;
                break;
            }
        }
        assert!(reached);
    }

    proptest! {
        #[test]
        fn prop_fall_speed_bounded(
            gravity in 0.1f32..3.0,
            terminal in 1.0f32..20.0,
            ticks in 1usize..120,
            with_enemy in any::<bool>(),
        ) {
            let mut data = level(6, 40);
            data.gravity = gravity;
            data.terminal_velocity = terminal;
            data.grass_locs = row(39, 0..=5);
            let mut world = World::from_level(&data, Hero::new());
            if with_enemy {
                // Hovers just below the start so contact pushes the hero up
                let mut flyer = Enemy::spawn(99, EnemyKind::Flyer, 0, 0);
                flyer.body.vel = Vec2::ZERO;
                flyer.body.pos += Vec2::new(10.0, 10.0);
                world.enemies.push(flyer);
            }
            for _ in 0..ticks {
                world.step();
                prop_assert!(world.hero.body.vel.y.abs() <= terminal);
            }
        }

        #[test]
        fn prop_hearts_never_increase(moves in proptest::collection::vec(0u8..4, 1..200)) {
            let mut data = level(10, 4);
            data.grass_locs = row(3, 0..=9);
            data.spikeman_locs = vec![TilePos(4, 2), TilePos(7, 2)];
            data.flyman_locs = vec![TilePos(5, 2)];
            let mut world = World::from_level(&data, Hero::new());
            let mut hearts = world.hero.hearts;
            for m in moves {
                match m {
                    0 => world.hero.move_left(),
                    1 => world.hero.move_right(),
                    2 => { world.hero.jump(&world.platforms); }
                    _ => world.hero.stop(),
                }
                world.step();
                prop_assert!(world.hero.hearts <= hearts);
                hearts = world.hero.hearts;
            }
        }
    }
}
