//! Mirror physics positions into transforms and meshes.

use crate::GameState;

pub fn run(gs: &mut GameState) {
    let mut movers = gs.store.enemies();
    movers.extend(gs.player);
    for id in movers {
        let Some(body) = gs.store.body(id).map(|b| b.body) else { continue };
        let Some(pos) = gs.backends.physics.translation(body) else { continue };
        if let Some(t) = gs.store.transform_mut(id) {
            t.pos = pos;
        }
        if let Some(m) = gs.store.mesh(id) {
            gs.backends.render.set_position(m.mesh, pos);
        }
    }
}
