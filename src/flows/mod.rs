//! The demo games as flows.
//!
//! Every demo runs on a shared [`Session`] state. The world flow of a demo
//! owns input handling and ticking; HUD flows only read the session.

use winit::{
    event::{ElementState, WindowEvent},
    keyboard::PhysicalKey,
};

use crate::{
    flow::Out,
    game::{
        Simulation,
        input::Key,
        session::{Phase, Session},
    },
};

pub mod hud;
pub mod shooter;
pub mod skate;

pub fn phase_colour(phase: Phase) -> wgpu::Color {
    match phase {
        Phase::Playing => wgpu::Color {
            r: 0.45,
            g: 0.65,
            b: 0.9,
            a: 1.0,
        },
        Phase::Title => wgpu::Color {
            r: 0.02,
            g: 0.02,
            b: 0.05,
            a: 1.0,
        },
        Phase::Paused => wgpu::Color {
            r: 0.1,
            g: 0.1,
            b: 0.15,
            a: 1.0,
        },
    }
}

/// Feed keyboard and focus events into the session.
///
/// A phase change recolours the background.
pub fn handle_input<S: Simulation>(session: &mut Session<S>, event: &WindowEvent) -> Out {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return Out::Empty;
            }
            let PhysicalKey::Code(code) = event.physical_key else {
                return Out::Empty;
            };
            let Some(key) = Key::from_code(code) else {
                return Out::Empty;
            };
            match session.key_event(key, event.state == ElementState::Pressed) {
                Some(phase) => Out::Configure(Box::new(move |ctx| {
                    ctx.clear_colour = phase_colour(phase)
                })),
                None => Out::Empty,
            }
        }
        WindowEvent::Focused(focused) => {
            session.set_focused(*focused);
            Out::Empty
        }
        _ => Out::Empty,
    }
}

/// Point the engine camera at the scene's view, if a scene is running.
pub fn follow_scene<S: Simulation>(session: &Session<S>) -> Out {
    match session.scene().map(Simulation::view) {
        Some(view) => Out::Configure(Box::new(move |ctx| ctx.camera.camera = view)),
        None => Out::Empty,
    }
}

/// Keep a successfully loaded resource, log the failure otherwise.
pub(crate) fn loaded<T>(what: &str, result: anyhow::Result<T>) -> Option<T> {
    match result {
        Ok(resource) => Some(resource),
        Err(e) => {
            log::error!("{what} will not be drawn: {e:#}");
            None
        }
    }
}
