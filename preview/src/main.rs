//! Desktop preview for the WS2801 strip driver
//!
//! Runs the demo effects through the real write path into a simulated strip
//! and draws whatever the simulated LEDs latched.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use ws2801_strip::effect::CpuStats;
use ws2801_strip::sim::{ShiftRegisterModel, SimBus, SimDelay, SimPins};
use ws2801_strip::{
    Canvas, EffectId, EffectSlot, FrameScheduler, Instant, Rgb, SharedStrip, Strip, StripConfig,
    parse_num_leds,
};

/// Maximum number of LEDs the preview supports
const MAX_LEDS: usize = 180;

/// Environment variable holding the LED count
const NUM_LEDS_ENV: &str = "WS2801_NUM_LEDS";

/// Diameter of a drawn LED, in points
const LED_DIAMETER: f32 = 14.0;

/// Simulated strip the driver writes into
static BUS: SimBus<MAX_LEDS> = SimBus::new();

type PreviewStrip = SharedStrip<SimPins<'static, MAX_LEDS>, SimDelay<'static, MAX_LEDS>, MAX_LEDS>;

fn main() -> eframe::Result<()> {
    let config = StripConfig::from_num_leds(
        std::env::var(NUM_LEDS_ENV)
            .ok()
            .as_deref()
            .and_then(parse_num_leds),
    );
    let strip: PreviewStrip = match Strip::open(&config, BUS.pins(), BUS.delay()) {
        Ok(strip) => strip,
        Err(e) => {
            eprintln!("ws2801-preview: {e}");
            std::process::exit(1);
        }
    };
    let strip: &'static PreviewStrip = Box::leak(Box::new(strip));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 320.0])
            .with_title("WS2801 Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "ws2801-preview",
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp::new(strip)?))),
    )
}

/// Samples the aggregate CPU counters between frames
#[derive(Default)]
struct LoadSampler {
    previous: Option<CpuStats>,
}

impl LoadSampler {
    /// Usage since the previous sample, `None` on the first call or off Linux
    fn sample(&mut self) -> Option<f32> {
        let stat = std::fs::read_to_string("/proc/stat").ok()?;
        let current = stat.lines().next().and_then(CpuStats::parse)?;
        let usage = self
            .previous
            .map(|previous| current.usage_since(&previous));
        self.previous = Some(current);
        usage
    }
}

struct PreviewApp {
    strip: &'static PreviewStrip,
    scheduler: FrameScheduler<'static, PreviewStrip, EffectSlot, MAX_LEDS>,
    load: LoadSampler,
    started: StdInstant,
    effect_id: EffectId,
    /// Lit pixel color and drift seed
    color: [u8; 3],
    paused: bool,
    last_error: Option<String>,
}

impl PreviewApp {
    fn new(strip: &'static PreviewStrip) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let effect_id = EffectId::WalkingPixel;
        let color = [255, 255, 255];
        let canvas = Canvas::new(strip)?;

        Ok(Self {
            strip,
            scheduler: FrameScheduler::new(canvas, effect_id.to_slot(rgb(color))),
            load: LoadSampler::default(),
            started: StdInstant::now(),
            effect_id,
            color,
            paused: false,
            last_error: None,
        })
    }

    fn now(&self) -> Instant {
        let elapsed = self.started.elapsed().as_millis();
        Instant::from_millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }

    /// Start the selected effect over from its first frame
    fn restart(&mut self) {
        self.started = StdInstant::now();
        self.scheduler
            .set_effect(self.effect_id.to_slot(rgb(self.color)));
    }

    fn report<T>(&mut self, result: Result<T, ws2801_strip::Error>) {
        self.last_error = result.err().map(|e| e.to_string());
    }

    /// Run the scheduler if a frame is due
    fn step(&mut self) {
        let now = self.now();
        if self.paused || !self.scheduler.is_due(now) {
            return;
        }

        if let Some(meter) = self.scheduler.effect_mut().load_meter_mut() {
            if let Some(usage) = self.load.sample() {
                meter.set_usage(usage);
            }
        }

        let result = self.scheduler.tick(now);
        self.report(result);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut selected = self.effect_id;
            egui::ComboBox::from_id_salt("effect")
                .selected_text(selected.as_str())
                .show_ui(ui, |ui| {
                    for id in EffectId::ALL {
                        ui.selectable_value(&mut selected, id, id.as_str());
                    }
                });
            let color_changed = ui.color_edit_button_srgb(&mut self.color).changed();
            if selected != self.effect_id || color_changed {
                self.effect_id = selected;
                self.restart();
            }

            ui.separator();
            ui.toggle_value(&mut self.paused, "Pause");
            if ui.button("Restart").clicked() {
                self.restart();
            }
            if ui.button("Clear").clicked() {
                // zero-length write switches the whole strip off
                self.paused = true;
                let result = self.strip.write(&[]);
                self.report(result);
            }
        });
    }
}

const fn rgb(color: [u8; 3]) -> Rgb {
    Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
    }
}

fn wire_stats(ui: &mut egui::Ui, led_count: usize, model: &ShiftRegisterModel<MAX_LEDS>) {
    let hold = model
        .shortest_clock_high_ns()
        .map_or_else(|| "-".to_owned(), |ns| format!("{ns} ns"));
    ui.label(format!(
        "{led_count} LEDs | {} frames latched | {} bits | shortest clock high {hold}",
        model.latches(),
        model.bits(),
    ));
}

fn draw_leds(ui: &mut egui::Ui, leds: &[Rgb]) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(3.0, 3.0);
        for led in leds {
            let (rect, _) =
                ui.allocate_exact_size(egui::Vec2::splat(LED_DIAMETER), egui::Sense::hover());
            ui.painter().circle_filled(
                rect.center(),
                LED_DIAMETER / 2.0,
                egui::Color32::from_rgb(led.r, led.g, led.b),
            );
        }
    });
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step();

        let led_count = self.strip.led_count() as usize;
        let outputs = BUS.outputs();
        let model = BUS.snapshot();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::TopBottomPanel::bottom("stats").show(ctx, |ui| {
            wire_stats(ui, led_count, &model);
            if let Some(error) = &self.last_error {
                ui.colored_label(egui::Color32::RED, error);
            }
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            draw_leds(ui, &outputs[..led_count.min(MAX_LEDS)]);
        });

        ctx.request_repaint();
    }
}
