use super::ray::{PickCandidate, cursor_to_ndc, first_interactive, ray_from_ndc};
use super::state::InteractiveNodeClicked;
use crate::engine::assets::environment_assets::EnvironmentMember;
use crate::engine::assets::scene_manifest::ActiveScene;
use crate::engine::camera::orbit_camera::SceneCamera;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

// Cast a ray through a released left click and report the nearest interactive node
pub fn pick_interactive_node(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Projection, &GlobalTransform), With<SceneCamera>>,
    members: Query<(), With<EnvironmentMember>>,
    names: Query<&Name>,
    parents: Query<&ChildOf>,
    scene: Res<ActiveScene>,
    mut ray_cast: MeshRayCast,
    mut clicks: EventWriter<InteractiveNodeClicked>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(ndc) = window
        .cursor_position()
        .and_then(|cursor| cursor_to_ndc(cursor, window.size()))
    else {
        return;
    };
    let Ok((projection, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(ray) = ray_from_ndc(projection, camera_transform, ndc) else {
        return;
    };

    // Every hit along the ray, nearest first. Members are only visible once integrated.
    let filter = |entity: Entity| members.contains(entity);
    let keep_going = |_: Entity| false;
    let settings = MeshRayCastSettings::default()
        .with_visibility(RayCastVisibility::Visible)
        .with_filter(&filter)
        .with_early_exit_test(&keep_going);

    let name_of = |entity: Entity| names.get(entity).ok().map(|name| name.as_str().to_string());
    let candidates: Vec<PickCandidate> = ray_cast
        .cast_ray(ray, &settings)
        .iter()
        .map(|(entity, hit)| PickCandidate {
            entity: *entity,
            distance: hit.distance,
            name: name_of(*entity),
            parent_name: parents
                .get(*entity)
                .ok()
                .and_then(|child_of| name_of(child_of.parent())),
        })
        .collect();

    if let Some(hit) = first_interactive(&candidates, &scene.0.interactive_prefix) {
        debug!("Picked `{}` at {:.2}", hit.label(), hit.distance);
        clicks.write(InteractiveNodeClicked {
            node: hit.entity,
            name: hit.label().to_string(),
            distance: hit.distance,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::environment_assets::Environment;
    use crate::engine::assets::node_roles::NodeRoles;
    use crate::engine::assets::scene_manifest::ActiveScene;
    use crate::tools::interaction::playback::trigger_playback;
    use crate::tools::interaction::state::{AnimationRegistry, PlaybackGate, PlaybackHandle};
    use bevy::render::primitives::Aabb;
    use bevy::window::WindowResolution;

    fn picking_app() -> App {
        let mut app = App::new();
        app.add_event::<InteractiveNodeClicked>()
            .init_resource::<ActiveScene>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Assets<Mesh>>()
            .add_systems(Update, pick_interactive_node);

        let mut window = Window {
            resolution: WindowResolution::new(800.0, 600.0),
            ..default()
        };
        window.set_cursor_position(Some(Vec2::new(400.0, 300.0)));
        app.world_mut().spawn((window, PrimaryWindow));

        let eye = Transform::from_xyz(0.0, 0.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y);
        app.world_mut().spawn((
            SceneCamera,
            Projection::Perspective(PerspectiveProjection {
                aspect_ratio: 800.0 / 600.0,
                ..default()
            }),
            GlobalTransform::from(eye),
        ));
        app
    }

    fn spawn_node(app: &mut App, name: &str, at: Vec3, member: bool) -> Entity {
        let handle = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(Cuboid::new(1.0, 1.0, 1.0));
        let aabb = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));

        let mut node = app.world_mut().spawn((
            Name::new(name.to_string()),
            Mesh3d(handle),
            aabb,
            GlobalTransform::from_translation(at),
            InheritedVisibility::VISIBLE,
            ViewVisibility::default(),
        ));
        if member {
            node.insert(EnvironmentMember);
        }
        node.id()
    }

    fn release_left_click(app: &mut App) {
        let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);
        app.update();
    }

    fn clicked(app: &App) -> Vec<InteractiveNodeClicked> {
        let events = app.world().resource::<Events<InteractiveNodeClicked>>();
        events.iter_current_update_events().cloned().collect()
    }

    #[test]
    fn centre_click_picks_interactive_member() {
        let mut app = picking_app();
        let axe = spawn_node(&mut app, "axe_handle", Vec3::ZERO, true);

        release_left_click(&mut app);

        let clicks = clicked(&app);
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].node, axe);
        assert_eq!(clicks[0].name, "axe_handle");
        assert!(clicks[0].distance > 4.0 && clicks[0].distance < 5.0);
    }

    #[test]
    fn nearer_non_interactive_node_does_not_block() {
        let mut app = picking_app();
        spawn_node(&mut app, "baked", Vec3::new(0.0, 0.0, 2.0), true);
        let axe = spawn_node(&mut app, "axe_head", Vec3::new(0.0, 0.0, -1.0), true);

        release_left_click(&mut app);

        let clicks = clicked(&app);
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].node, axe);
    }

    #[test]
    fn non_members_and_misses_are_ignored() {
        let mut app = picking_app();
        spawn_node(&mut app, "axe_handle", Vec3::ZERO, false);
        spawn_node(&mut app, "axe_spare", Vec3::new(10.0, 0.0, 0.0), true);

        release_left_click(&mut app);
        assert!(clicked(&app).is_empty());
    }

    #[test]
    fn held_button_does_not_pick() {
        let mut app = picking_app();
        spawn_node(&mut app, "axe_handle", Vec3::ZERO, true);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        assert!(clicked(&app).is_empty());
    }

    #[test]
    fn click_on_axe_starts_playback() {
        let mut app = picking_app();
        spawn_node(&mut app, "axe_handle", Vec3::ZERO, true);
        app.init_resource::<PlaybackGate>()
            .init_resource::<AnimationRegistry>()
            .insert_resource(Environment {
                root: Entity::PLACEHOLDER,
                roles: NodeRoles::default(),
            })
            .add_systems(Update, trigger_playback.after(pick_interactive_node));

        let player = app.world_mut().spawn(AnimationPlayer::default()).id();
        let node = AnimationNodeIndex::new(1);
        app.world_mut().resource_mut::<AnimationRegistry>().register(
            "axe",
            PlaybackHandle {
                player,
                node,
                repetitions: 2,
            },
        );
        assert!(!app.world().resource::<PlaybackGate>().is_active());

        release_left_click(&mut app);

        assert!(app.world().resource::<PlaybackGate>().is_active());
        let animation = app
            .world()
            .get::<AnimationPlayer>(player)
            .and_then(|player| player.animation(node))
            .map(|animation| animation.repeat_mode());
        assert_eq!(animation, Some(bevy::animation::RepeatAnimation::Count(2)));
    }
}
