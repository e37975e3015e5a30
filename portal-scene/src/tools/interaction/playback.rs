use super::state::{AnimationRegistry, InteractiveNodeClicked, PlaybackGate, PlaybackHandle};
use crate::engine::assets::environment_assets::Environment;
use crate::engine::assets::scene_manifest::ActiveScene;
use bevy::animation::RepeatAnimation;
use bevy::prelude::*;

fn bound_handle<'a>(scene: &ActiveScene, registry: &'a AnimationRegistry) -> Option<&'a PlaybackHandle> {
    scene
        .0
        .animation
        .as_ref()
        .and_then(|binding| registry.get(&binding.name))
}

// Restart the bound animation on an interactive click unless it is still playing
pub fn trigger_playback(
    mut clicks: EventReader<InteractiveNodeClicked>,
    environment: Option<Res<Environment>>,
    scene: Res<ActiveScene>,
    registry: Res<AnimationRegistry>,
    mut gate: ResMut<PlaybackGate>,
    mut players: Query<&mut AnimationPlayer>,
) {
    // One playback per frame however many clicks arrived.
    let Some(click) = clicks.read().last() else {
        return;
    };
    if environment.is_none() {
        return;
    }
    if gate.is_active() {
        debug!("Playback running, click on `{}` ignored", click.name);
        return;
    }
    let Some(handle) = bound_handle(&scene, &registry) else {
        return;
    };
    let Ok(mut player) = players.get_mut(handle.player) else {
        warn!("Animation player {} is gone", handle.player);
        return;
    };

    player.stop_all();
    player
        .start(handle.node)
        .set_repeat(RepeatAnimation::Count(handle.repetitions));
    gate.open();

    info!(
        "▶ Playing animation x{} after click on `{}`",
        handle.repetitions, click.name
    );
}

pub fn playback_finished(player: &AnimationPlayer, node: AnimationNodeIndex) -> bool {
    player
        .animation(node)
        .is_none_or(|animation| animation.is_finished())
}

pub fn release_finished_playback(
    mut gate: ResMut<PlaybackGate>,
    scene: Res<ActiveScene>,
    registry: Res<AnimationRegistry>,
    players: Query<&AnimationPlayer>,
) {
    if !gate.is_active() {
        return;
    }

    let finished = bound_handle(&scene, &registry)
        .and_then(|handle| {
            players
                .get(handle.player)
                .ok()
                .map(|player| playback_finished(player, handle.node))
        })
        .unwrap_or(true);

    if finished {
        gate.close();
        debug!("Playback finished, clicks re-enabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::node_roles::NodeRoles;

    const NODE: usize = 1;

    fn playback_app(with_environment: bool) -> (App, Entity) {
        let mut app = App::new();
        app.add_event::<InteractiveNodeClicked>()
            .init_resource::<ActiveScene>()
            .init_resource::<PlaybackGate>()
            .init_resource::<AnimationRegistry>()
            .add_systems(Update, (trigger_playback, release_finished_playback).chain());

        let player = app.world_mut().spawn(AnimationPlayer::default()).id();
        app.world_mut().resource_mut::<AnimationRegistry>().register(
            "axe",
            PlaybackHandle {
                player,
                node: AnimationNodeIndex::new(NODE),
                repetitions: 2,
            },
        );
        if with_environment {
            app.insert_resource(Environment {
                root: Entity::PLACEHOLDER,
                roles: NodeRoles::default(),
            });
        }
        (app, player)
    }

    fn click(app: &mut App) {
        app.world_mut().send_event(InteractiveNodeClicked {
            node: Entity::PLACEHOLDER,
            name: "axe_handle".to_string(),
            distance: 1.0,
        });
        app.update();
    }

    fn player(app: &App, entity: Entity) -> &AnimationPlayer {
        app.world().get::<AnimationPlayer>(entity).unwrap()
    }

    #[test]
    fn click_starts_stopped_animation() {
        let (mut app, entity) = playback_app(true);
        assert!(!player(&app, entity).is_playing_animation(AnimationNodeIndex::new(NODE)));

        click(&mut app);

        let player = player(&app, entity);
        let animation = player.animation(AnimationNodeIndex::new(NODE)).unwrap();
        assert!(player.is_playing_animation(AnimationNodeIndex::new(NODE)));
        assert_eq!(animation.repeat_mode(), RepeatAnimation::Count(2));
        assert!(app.world().resource::<PlaybackGate>().is_active());
    }

    #[test]
    fn gate_blocks_restart_mid_playback() {
        let (mut app, entity) = playback_app(true);
        click(&mut app);

        app.world_mut()
            .get_mut::<AnimationPlayer>(entity)
            .unwrap()
            .animation_mut(AnimationNodeIndex::new(NODE))
            .unwrap()
            .seek_to(0.5);
        click(&mut app);

        let animation = player(&app, entity)
            .animation(AnimationNodeIndex::new(NODE))
            .unwrap();
        assert_eq!(animation.seek_time(), 0.5);
    }

    #[test]
    fn click_before_environment_is_a_no_op() {
        let (mut app, entity) = playback_app(false);

        click(&mut app);

        assert!(!player(&app, entity).is_playing_animation(AnimationNodeIndex::new(NODE)));
        assert!(!app.world().resource::<PlaybackGate>().is_active());
    }

    #[test]
    fn gate_reopens_after_playback_ends() {
        let (mut app, entity) = playback_app(true);
        click(&mut app);

        app.world_mut()
            .get_mut::<AnimationPlayer>(entity)
            .unwrap()
            .stop_all();
        app.update();
        assert!(!app.world().resource::<PlaybackGate>().is_active());

        click(&mut app);
        assert!(player(&app, entity).is_playing_animation(AnimationNodeIndex::new(NODE)));
    }
}
