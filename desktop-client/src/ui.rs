use eframe::egui;
use tokio::sync::mpsc;

use engine::game::{CELL_PADDING, Direction, Frame, GameStatus};
use engine::session::InputCommand;

use crate::game_loop::format_game_over_reason;
use crate::palette::BoardPalette;
use crate::state::SharedState;

pub struct GameApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<InputCommand>,
    palette: BoardPalette,
}

impl GameApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<InputCommand>,
        dark_theme: bool,
    ) -> Self {
        let palette = if dark_theme {
            BoardPalette::dark()
        } else {
            BoardPalette::light()
        };
        Self {
            shared_state,
            command_tx,
            palette,
        }
    }

    fn send(&self, command: InputCommand) {
        let _ = self.command_tx.send(command);
    }

    fn handle_input(&self, ctx: &egui::Context, status: Option<GameStatus>) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
                self.send(InputCommand::Turn(Direction::Up));
            } else if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
                self.send(InputCommand::Turn(Direction::Down));
            } else if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
                self.send(InputCommand::Turn(Direction::Left));
            } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
                self.send(InputCommand::Turn(Direction::Right));
            }

            if i.key_pressed(egui::Key::Space) {
                self.send(InputCommand::TogglePause);
            }
            if i.key_pressed(egui::Key::Enter) && status == Some(GameStatus::GameOver) {
                self.send(InputCommand::Restart);
            }
        });

        ctx.request_repaint();
    }

    fn render_board(&self, ui: &mut egui::Ui, frame: &Frame) {
        let stride = (frame.cell_size + CELL_PADDING) as f32;
        let cell = frame.cell_size as f32;
        let canvas = egui::Vec2::new(frame.cols as f32 * stride, frame.rows as f32 * stride);

        let (response, painter) = ui.allocate_painter(canvas, egui::Sense::hover());
        let origin = response.rect.min;
        painter.rect_filled(response.rect, 4.0, self.palette.background);

        for y in 0..frame.rows {
            for x in 0..frame.cols {
                let level = frame.cell_levels[y * frame.cols + x];
                let rect = egui::Rect::from_min_size(
                    egui::pos2(origin.x + x as f32 * stride, origin.y + y as f32 * stride),
                    egui::vec2(cell, cell),
                );
                painter.rect_filled(rect, 2.0, self.palette.for_level(level));
            }
        }

        if let Some(food) = &frame.food {
            let center = egui::pos2(
                origin.x + food.pos.x as f32 * stride + cell / 2.0,
                origin.y + food.pos.y as f32 * stride + cell / 2.0,
            );
            painter.circle_filled(center, cell / 2.0, self.palette.food);
            let glyph = food
                .kind
                .label()
                .chars()
                .next()
                .unwrap_or('?')
                .to_ascii_uppercase();
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                glyph,
                egui::FontId::monospace(cell * 0.7),
                self.palette.food_glyph,
            );
        }

        for (i, segment) in frame.snake.iter().enumerate() {
            let rect = egui::Rect::from_min_size(
                egui::pos2(
                    origin.x + segment.x as f32 * stride,
                    origin.y + segment.y as f32 * stride,
                ),
                egui::vec2(cell, cell),
            );
            let color = if i == 0 {
                self.palette.snake_head
            } else {
                self.palette.snake_body
            };
            painter.rect_filled(rect, 3.0, color);
        }
    }

    fn render_controls(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.send(InputCommand::Turn(Direction::Left));
            }
            if ui.button("▲").clicked() {
                self.send(InputCommand::Turn(Direction::Up));
            }
            if ui.button("▼").clicked() {
                self.send(InputCommand::Turn(Direction::Down));
            }
            if ui.button("▶").clicked() {
                self.send(InputCommand::Turn(Direction::Right));
            }
            if ui.button("⏸").clicked() {
                self.send(InputCommand::TogglePause);
            }
        });
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame = self.shared_state.get_frame();
        let game_over = self.shared_state.get_game_over();

        self.handle_input(ctx, frame.as_ref().map(|f| f.status));

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(frame) = frame else {
                ui.heading("Waiting for the game to start...");
                ui.spinner();
                return;
            };

            ui.horizontal(|ui| {
                ui.heading(format!("Score: {}", frame.score));
                ui.separator();
                ui.heading(format!("High score: {}", frame.high_score));
                if frame.status == GameStatus::Paused {
                    ui.separator();
                    ui.heading("Paused");
                }
            });
            ui.separator();

            self.render_board(ui, &frame);

            ui.add_space(5.0);
            self.render_controls(ui);

            let events = self.shared_state.event_lines();
            if !events.is_empty() {
                ui.separator();
                for line in events.iter().rev() {
                    ui.label(line);
                }
            }

            ui.separator();
            ui.label("Arrows/WASD to steer, Space to pause, Enter to restart after a game over.");
        });

        if let Some(report) = game_over {
            egui::Window::new("Game Over")
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label(format_game_over_reason(report.reason));
                    ui.label(format!("Final score: {}", report.score));
                    if report.new_high_score {
                        ui.label(format!("New high score: {}!", report.high_score));
                    } else {
                        ui.label(format!("High score: {}", report.high_score));
                    }
                    ui.add_space(5.0);
                    if ui.button("Play Again").clicked() {
                        self.send(InputCommand::Restart);
                    }
                });
        }
    }
}
