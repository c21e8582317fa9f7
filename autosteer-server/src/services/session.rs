use std::net::SocketAddr;

use autosteer_api::{
    Frame, ProtocolError, ServerEvent, SteerCommand, TELEMETRY_EVENT, Telemetry,
};
use autosteer_pid::{Controller, Gains, clamp_steering};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// One simulator connection and the controller it owns.
///
/// Every connection gets a fresh controller, so error state never carries
/// over between connections.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    peer: Option<SocketAddr>,
    controller: Controller,
    throttle: f64,
    steps: u64,
    last_telemetry: Option<Telemetry>,
    last_command: Option<SteerCommand>,
}

/// Copy of a session's state, published for observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub peer: Option<String>,
    pub steps: u64,
    pub cte: Option<f64>,
    pub steering_angle: Option<f64>,
    pub p_error: f64,
    pub i_error: f64,
    pub d_error: f64,
}

impl Session {
    pub fn new(peer: Option<SocketAddr>, gains: Gains, throttle: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer,
            controller: Controller::new(gains),
            throttle,
            steps: 0,
            last_telemetry: None,
            last_command: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Handles one inbound text frame, returning the reply to send if any.
    pub fn handle_frame(&mut self, text: &str) -> Option<ServerEvent> {
        match Frame::parse(text) {
            Ok(Frame::Event { name, data }) if name == TELEMETRY_EVENT => {
                Some(self.handle_telemetry(&data))
            }
            Ok(Frame::Event { name, .. }) => {
                tracing::debug!(session = %self.id, "Ignoring event {}", name);
                None
            }
            Ok(Frame::Empty) => Some(ServerEvent::Manual),
            Err(ProtocolError::NotAnEvent) => None,
            Err(e) => {
                tracing::warn!(session = %self.id, "Rejected frame: {}", e);
                Some(ServerEvent::Manual)
            }
        }
    }

    fn handle_telemetry(&mut self, data: &Value) -> ServerEvent {
        let telemetry = match Telemetry::from_value(data) {
            Ok(telemetry) => telemetry,
            Err(e) => {
                tracing::warn!(session = %self.id, "Rejected telemetry: {}", e);
                return ServerEvent::Manual;
            }
        };

        let steering_angle = clamp_steering(self.controller.step(telemetry.cte));

        tracing::debug!(
            "CTE: {} | Speed: {} | Angle: {} | Steering Value: {}",
            telemetry.cte,
            telemetry.speed,
            telemetry.steering_angle,
            steering_angle
        );

        let command = SteerCommand {
            steering_angle,
            throttle: self.throttle,
        };

        self.steps += 1;
        self.last_telemetry = Some(telemetry);
        self.last_command = Some(command);

        ServerEvent::Steer(command)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            peer: self.peer.map(|peer| peer.to_string()),
            steps: self.steps,
            cte: self.last_telemetry.map(|telemetry| telemetry.cte),
            steering_angle: self.last_command.map(|command| command.steering_angle),
            p_error: self.controller.p_error(),
            i_error: self.controller.i_error(),
            d_error: self.controller.d_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telemetry(cte: &str) -> String {
        format!(r#"42["telemetry",{{"cte":"{cte}","speed":"12.5","steering_angle":"-1.25"}}]"#)
    }

    fn steer(event: Option<ServerEvent>) -> SteerCommand {
        match event {
            Some(ServerEvent::Steer(command)) => command,
            other => panic!("expected a steer command, got {other:?}"),
        }
    }

    #[test]
    fn test_telemetry_is_answered_with_steer() {
        let gains = Gains::new(0.085, 0.0008, 0.95);
        let mut session = Session::new(None, gains, 0.25);

        let command = steer(session.handle_frame(&telemetry("0.7598")));

        let expected = Controller::new(gains).step(0.7598);
        assert_eq!(command.steering_angle, expected);
        assert_eq!(command.throttle, 0.25);
        assert_eq!(session.controller().p_error(), 0.7598);
    }

    #[test]
    fn test_steering_is_clamped_at_the_boundary() {
        let mut session = Session::new(None, Gains::new(2.0, 0.5, 1.0), 0.3);

        let command = steer(session.handle_frame(&telemetry("3.0")));

        assert_eq!(command.steering_angle, -1.0);
        // The controller itself keeps the unclamped value.
        assert_eq!(session.controller().total_error(), -10.5);

        let command = steer(session.handle_frame(&telemetry("-3.0")));
        assert_eq!(command.steering_angle, 1.0);
    }

    #[test]
    fn test_null_payload_requests_manual_mode() {
        let mut session = Session::new(None, Gains::default(), 0.25);

        assert_eq!(session.handle_frame("42[\"telemetry\",null]"), Some(ServerEvent::Manual));
        assert_eq!(session.snapshot().steps, 0);
    }

    #[test]
    fn test_invalid_telemetry_leaves_controller_untouched() {
        let mut session = Session::new(None, Gains::new(1.0, 1.0, 1.0), 0.25);
        session.handle_frame(&telemetry("0.5"));

        for frame in [telemetry("inf"), telemetry("NaN"), telemetry("left"), "42[\"telemetry\",{}]".into()] {
            assert_eq!(session.handle_frame(&frame), Some(ServerEvent::Manual));
        }

        let controller = session.controller();
        assert_eq!(
            (controller.p_error(), controller.i_error(), controller.d_error()),
            (0.5, 0.5, 0.5)
        );
        assert_eq!(session.snapshot().steps, 1);
    }

    #[test]
    fn test_other_frames_are_ignored() {
        let mut session = Session::new(None, Gains::default(), 0.25);

        assert_eq!(session.handle_frame("2"), None);
        assert_eq!(session.handle_frame("40"), None);
        assert_eq!(session.handle_frame(r#"42["reset",{}]"#), None);
    }

    #[test]
    fn test_malformed_json_requests_manual_mode() {
        let mut session = Session::new(None, Gains::default(), 0.25);

        assert_eq!(session.handle_frame(r#"42["telemetry",{"#), Some(ServerEvent::Manual));
    }

    #[test]
    fn test_sessions_do_not_share_error_state() {
        let gains = Gains::new(0.1, 0.01, 1.0);
        let mut first = Session::new(None, gains, 0.25);
        let mut second = Session::new(None, gains, 0.25);

        first.handle_frame(&telemetry("0.8"));
        first.handle_frame(&telemetry("0.6"));
        let command = steer(second.handle_frame(&telemetry("0.6")));

        assert_ne!(first.id(), second.id());
        assert_eq!(first.controller().i_error(), 0.8 + 0.6);
        assert_eq!(second.controller().i_error(), 0.6);
        assert_eq!(command.steering_angle, Controller::new(gains).step(0.6));
    }

    #[test]
    fn test_snapshot_tracks_last_step() {
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let mut session = Session::new(Some(peer), Gains::new(0.1, 0.0, 0.0), 0.25);

        let empty = session.snapshot();
        assert_eq!(empty.steps, 0);
        assert_eq!(empty.cte, None);
        assert_eq!(empty.steering_angle, None);
        assert_eq!(empty.peer.as_deref(), Some("127.0.0.1:50000"));

        session.handle_frame(&telemetry("2.0"));
        session.handle_frame(&telemetry("1.0"));
        let snapshot = session.snapshot();

        assert_eq!(snapshot.id, session.id());
        assert_eq!(snapshot.steps, 2);
        assert_eq!(snapshot.cte, Some(1.0));
        assert_eq!(snapshot.steering_angle, Some(-0.1));
        assert_eq!((snapshot.p_error, snapshot.i_error, snapshot.d_error), (1.0, 3.0, -1.0));
    }
}
