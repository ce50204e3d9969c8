//! Editor lifecycle
//!
//! Switching away from an editor discards it; switching in builds a fresh
//! one. The grid variant is seeded from the attribute store, mask and
//! perspective from previously saved points when there are any.

use crate::core::settings::ZonaSettings;
use crate::editing::{EditorSurface, EditorVariant, GridAttributes};
use crate::io::{AttributeStore, PointSubmitter};
use crate::modes::ModeState;
use bevy::prelude::*;
use kurbo::Point;
use std::sync::Arc;

/// The editor currently shown, if any
#[derive(Resource, Debug, Default)]
pub struct ActiveEditor {
    pub surface: Option<EditorSurface>,
}

/// Backing store for persisted grid attributes
#[derive(Resource)]
pub struct GridAttributeStore {
    pub store: Box<dyn AttributeStore>,
}

/// Destination for saved points
#[derive(Resource, Clone)]
pub struct Submitter {
    pub submitter: Arc<dyn PointSubmitter>,
}

/// Last known points for the editors that restore from saved input
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct RestoredPoints {
    pub mask: Option<Vec<Point>>,
    pub perspective: Option<Vec<Point>>,
}

impl RestoredPoints {
    /// Remember what was just saved so the next visit starts from it
    pub fn remember(&mut self, variant: EditorVariant, points: &[Point]) {
        match variant {
            EditorVariant::Mask => self.mask = Some(points.to_vec()),
            EditorVariant::Perspective => self.perspective = Some(points.to_vec()),
            EditorVariant::Grid => {}
        }
    }
}

/// Construct the editor for `variant`
pub fn build_editor(
    variant: EditorVariant,
    settings: &ZonaSettings,
    store: &dyn AttributeStore,
    restored: &RestoredPoints,
) -> EditorSurface {
    let surface = match variant {
        EditorVariant::Mask => match &restored.mask {
            Some(points) => EditorSurface::mask_restored(points.clone()),
            None => EditorSurface::mask(),
        },
        EditorVariant::Perspective => match &restored.perspective {
            Some(points) => EditorSurface::perspective_restored(points),
            None => EditorSurface::perspective(),
        },
        EditorVariant::Grid => EditorSurface::grid(GridAttributes::load(store)),
    };
    surface
        .with_hit_radius(settings.handle_radius)
        .with_vertex_drag(settings.mask_vertex_drag)
}

/// Build or discard the editor whenever the view changes
pub fn sync_editor_with_mode(
    mode_state: Res<ModeState>,
    settings: Res<ZonaSettings>,
    store: Res<GridAttributeStore>,
    restored: Res<RestoredPoints>,
    mut editor: ResMut<ActiveEditor>,
) {
    if !mode_state.just_changed() {
        return;
    }

    editor.surface = mode_state
        .active
        .editor_variant()
        .map(|variant| build_editor(variant, &settings, store.store.as_ref(), &restored));

    match &editor.surface {
        Some(surface) => debug!(
            "{} editor opened with {} points",
            surface.variant().name(),
            surface.points().len()
        ),
        None => debug!("Editor closed"),
    }
}

/// Write grid attribute changes through to the store
pub fn persist_surface_changes(mut editor: ResMut<ActiveEditor>, mut store: ResMut<GridAttributeStore>) {
    if !editor.is_changed() {
        return;
    }
    let Some(surface) = editor.bypass_change_detection().surface.as_mut() else {
        return;
    };
    for change in surface.drain_changes() {
        if let Err(e) = GridAttributes::persist(store.store.as_mut(), &change) {
            warn!("Failed to persist grid attribute {:?}: {}", change, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{PointerEvent, SurfaceChange};
    use crate::io::attribute_store::KEY_GRID_SIZE;
    use crate::io::MemoryStore;
    use crate::modes::{ModeStatePlugin, SwitchModeEvent, ViewMode};

    fn test_app(start: ViewMode) -> App {
        let mut app = App::new();
        app.add_plugins(ModeStatePlugin)
            .insert_resource(ModeState::starting_in(start))
            .insert_resource(ZonaSettings::default())
            .insert_resource(GridAttributeStore {
                store: Box::new(MemoryStore::default()),
            })
            .init_resource::<RestoredPoints>()
            .init_resource::<ActiveEditor>()
            .add_systems(Update, (sync_editor_with_mode, persist_surface_changes).chain());
        app
    }

    #[test]
    fn restored_points_seed_mask_and_perspective() {
        let restored = RestoredPoints {
            mask: Some(vec![Point::new(10.0, 10.0), Point::new(30.0, 10.0), Point::new(20.0, 30.0)]),
            perspective: Some(vec![Point::new(1.0, 1.0); 3]),
        };
        let settings = ZonaSettings::default();
        let store = MemoryStore::default();

        let mask = build_editor(EditorVariant::Mask, &settings, &store, &restored);
        assert!(mask.is_closed());
        assert_eq!(mask.points().len(), 3);

        // three points is not a quad, so the defaults stay
        let perspective = build_editor(EditorVariant::Perspective, &settings, &store, &restored);
        assert_eq!(
            perspective.points().all(),
            &crate::editing::surface::PERSPECTIVE_DEFAULT[..]
        );
    }

    #[test]
    fn remember_ignores_grid() {
        let mut restored = RestoredPoints::default();
        restored.remember(EditorVariant::Grid, &[Point::new(1.0, 1.0)]);
        assert_eq!(restored, RestoredPoints::default());
        restored.remember(EditorVariant::Perspective, &[Point::new(1.0, 1.0)]);
        assert_eq!(restored.perspective.as_deref(), Some(&[Point::new(1.0, 1.0)][..]));
    }

    #[test]
    fn switching_views_builds_and_discards_editors() {
        let mut app = test_app(ViewMode::Mask);
        app.update();
        {
            let mut editor = app.world_mut().resource_mut::<ActiveEditor>();
            let surface = editor.surface.as_mut().unwrap();
            assert_eq!(surface.variant(), EditorVariant::Mask);
            surface.handle_pointer(PointerEvent::primary_down(40.0, 40.0));
            surface.handle_pointer(PointerEvent::up(40.0, 40.0));
        }

        app.world_mut().send_event(SwitchModeEvent { mode: ViewMode::Live });
        app.update();
        assert!(app.world().resource::<ActiveEditor>().surface.is_none());

        // a fresh mask, not the discarded one
        app.world_mut().send_event(SwitchModeEvent { mode: ViewMode::Mask });
        app.update();
        let editor = app.world().resource::<ActiveEditor>();
        assert!(editor.surface.as_ref().unwrap().points().is_empty());
    }

    #[test]
    fn grid_changes_reach_the_store() {
        let mut app = test_app(ViewMode::Grid);
        app.update();
        app.world_mut()
            .resource_mut::<ActiveEditor>()
            .surface
            .as_mut()
            .unwrap()
            .step_grid_resolution(1);
        app.update();

        let store = app.world().resource::<GridAttributeStore>();
        assert_eq!(store.store.get(KEY_GRID_SIZE).as_deref(), Some("21"));

        let mut editor = app.world_mut().resource_mut::<ActiveEditor>();
        let pending: Vec<SurfaceChange> = editor.surface.as_mut().unwrap().drain_changes();
        assert!(pending.is_empty());
    }
}
