use std::io;
use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Terminal;

use led_control::armable::Armable;
use led_control::blink::BlinkLed;
use led_control::bsp::gpio::Level;
use led_control::flicker::FlickerLed;
use led_control::led::{PwmLed, SimpleLed};

use crate::dummy_gpio::DummyGpio;
use crate::dummy_pwm::DummyPwm;
use crate::system_rng::SystemRng;
use crate::wall_clock::WallClock;

mod dummy_gpio;
mod dummy_pwm;
mod system_rng;
mod wall_clock;

const SIMPLE_PIN: u8 = 13;
const PWM_PIN: u8 = 11;
const BLINK_PIN: u8 = 9;
const FLICKER_PIN: u8 = 5;

const DUTY_STEP: u8 = 16;
const PERIOD_STEP: u32 = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gpio = DummyGpio::create();
    let pwm = DummyPwm::create();
    let clock = WallClock::create();
    let rng = SystemRng::create();

    let simple = SimpleLed::new(&gpio, SIMPLE_PIN);
    let dimmed = PwmLed::new(&gpio, &pwm, PWM_PIN, 160);
    let blink = BlinkLed::new(&gpio, &clock, BLINK_PIN, 1000);
    let flicker = FlickerLed::new(&gpio, &pwm, &clock, &rng, FLICKER_PIN, 30, 220, 100);

    simple.init();
    dimmed.init();
    blink.init();
    flicker.init();

    enable_raw_mode().expect("can run in raw mode");
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut simple_on = false;
    let mut dimmed_on = false;
    let mut blink_armed = false;
    let mut flicker_armed = false;

    loop {
        if event::poll(Duration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') => {
                        simple_on = !simple_on;
                        if simple_on {
                            simple.on();
                        } else {
                            simple.off();
                        }
                    }
                    KeyCode::Char('2') => {
                        dimmed_on = !dimmed_on;
                        if dimmed_on {
                            dimmed.on();
                        } else {
                            dimmed.off();
                        }
                    }
                    KeyCode::Char('+') => {
                        dimmed.set_duty(dimmed.get_duty().saturating_add(DUTY_STEP));
                    }
                    KeyCode::Char('-') => {
                        dimmed.set_duty(dimmed.get_duty().saturating_sub(DUTY_STEP));
                    }
                    KeyCode::Char('3') => {
                        blink_armed = !blink_armed;
                        if blink_armed {
                            blink.on();
                        } else {
                            blink.off();
                        }
                    }
                    KeyCode::Char(']') => {
                        blink.set_period_ms(blink.get_period_ms() + PERIOD_STEP);
                    }
                    KeyCode::Char('[') => {
                        blink.set_period_ms(blink.get_period_ms().saturating_sub(PERIOD_STEP));
                    }
                    KeyCode::Char('4') => {
                        flicker_armed = !flicker_armed;
                        if flicker_armed {
                            flicker.on();
                        } else {
                            flicker.off();
                        }
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        break;
                    }
                    _ => {}
                }
            }
        }

        blink.update();
        flicker.update();

        draw_tui(
            &mut terminal,
            &gpio,
            &pwm,
            &dimmed,
            &blink,
            blink_armed,
            flicker_armed,
        )?;
    }

    disable_raw_mode().expect("can go back to normal");
    terminal.clear()?;

    Ok(())
}

fn draw_tui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    gpio: &DummyGpio,
    pwm: &DummyPwm,
    dimmed: &PwmLed,
    blink: &BlinkLed,
    blink_armed: bool,
    flicker_armed: bool,
) -> io::Result<()> {
    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(2),
                ]
                .as_ref(),
            )
            .split(size);

        let simple_row = led_row(
            format!("simple   pin {}", SIMPLE_PIN),
            level_to_duty(gpio.level(SIMPLE_PIN)),
        );
        let dimmed_row = led_row(
            format!(
                "dimmed   pin {}  duty {}",
                PWM_PIN,
                dimmed.get_duty()
            ),
            pwm.duty(PWM_PIN),
        );
        let blink_row = led_row(
            format!(
                "blink    pin {}  period {} ms  {}",
                BLINK_PIN,
                blink.get_period_ms(),
                if blink_armed { "armed" } else { "disarmed" }
            ),
            level_to_duty(gpio.level(BLINK_PIN)),
        );
        let flicker_row = led_row(
            format!(
                "flicker  pin {}  {}",
                FLICKER_PIN,
                if flicker_armed { "armed" } else { "disarmed" }
            ),
            pwm.duty(FLICKER_PIN),
        );

        let help = Paragraph::new(vec![
            Spans::from(Span::raw("1 simple on/off   2 dimmed on/off   +/- duty")),
            Spans::from(Span::raw("3 blink arm       [/] period       4 flicker arm")),
            Spans::from(Span::raw("q quit")),
        ])
        .alignment(Alignment::Left);

        rect.render_widget(simple_row, vertical_layout[0]);
        rect.render_widget(dimmed_row, vertical_layout[1]);
        rect.render_widget(blink_row, vertical_layout[2]);
        rect.render_widget(flicker_row, vertical_layout[3]);
        rect.render_widget(help, vertical_layout[4]);
    })?;
    Ok(())
}

/// One row per led: a label and a bar whose width follows the duty cycle
fn led_row(label: String, duty: u8) -> Paragraph<'static> {
    return Paragraph::new(Spans::from(vec![
        Span::raw(format!("{:<40}", label)),
        Span::styled(
            " ".repeat((duty / 4) as usize),
            Style::default().bg(Color::Rgb(253, 244, 220)),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
}

fn level_to_duty(level: Level) -> u8 {
    return if level == Level::High { u8::MAX } else { 0 };
}
