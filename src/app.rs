use iced::widget::{button, column, container, image, row, rule, scrollable, text, Stack};
use iced::{Color, Element, Length, Padding, Size, Subscription, Task, Theme};

use crate::config::Config;
use crate::detail::{Arrangement, DetailView};
use crate::drag_area::DragArea;
use crate::grid::GridView;
use crate::layout::Viewport;
use crate::metadata::FileInfo;
use crate::route::{Route, Router};
use crate::source::{FixtureSource, FsSource, ImageSource};
use crate::tile::Tile;

const LABEL_COLOR: Color = Color::from_rgb(0.5, 0.5, 0.55);

pub fn run(config: Config) -> iced::Result {
    let window_size = Size::new(config.window_width, config.window_height);
    iced::application(move || boot(config.clone()), update, view)
        .title("Image Viewer")
        .theme(theme)
        .subscription(subscription)
        .window_size(window_size)
        .centered()
        .run()
}

fn boot(config: Config) -> (Corkboard, Task<Message>) {
    let source: Box<dyn ImageSource> = if config.hosted {
        log::info!("Hosted mode: serving the built-in sample images");
        Box::new(FixtureSource)
    } else {
        Box::new(FsSource)
    };
    let viewport = Viewport {
        width: config.window_width,
        height: config.window_height,
    };
    let router = Router::default();
    let screen = open_screen(router.current(), source.as_ref(), &config, viewport);
    let state = Corkboard {
        source,
        config,
        viewport,
        router,
        screen,
    };
    (state, Task::none())
}

struct Corkboard {
    source: Box<dyn ImageSource>,
    config: Config,
    viewport: Viewport,
    router: Router,
    screen: Screen,
}

enum Screen {
    Grid(GridView),
    Detail(DetailView),
}

#[derive(Debug, Clone)]
pub enum Message {
    WindowResized(Size),
    DragStarted(usize),
    Dragged(usize, f32, f32),
    DragEnded(usize),
    OpenDetail(usize),
    Back,
}

/// Every navigation builds the target screen from scratch.
fn open_screen(
    route: &Route,
    source: &dyn ImageSource,
    config: &Config,
    viewport: Viewport,
) -> Screen {
    match route {
        Route::Grid => Screen::Grid(GridView::new(
            source,
            config.images_dir.clone(),
            config.desktop,
            viewport.width,
        )),
        Route::Detail(image) => Screen::Detail(DetailView::new(source, image.clone(), viewport)),
    }
}

fn subscription(_state: &Corkboard) -> Subscription<Message> {
    iced::event::listen_with(|event, _status, _window| match event {
        iced::Event::Window(iced::window::Event::Resized(size)) => {
            Some(Message::WindowResized(size))
        }
        iced::Event::Keyboard(iced::keyboard::Event::KeyPressed { key, .. }) => {
            use iced::keyboard::key::Named;
            use iced::keyboard::Key;
            match key {
                Key::Named(Named::Escape) | Key::Named(Named::Backspace) => Some(Message::Back),
                _ => None,
            }
        }
        _ => None,
    })
}

fn update(state: &mut Corkboard, message: Message) -> Task<Message> {
    match message {
        Message::WindowResized(size) => {
            state.viewport = Viewport {
                width: size.width,
                height: size.height,
            };
            match &mut state.screen {
                Screen::Grid(grid) => {
                    if grid.resize(state.source.as_ref(), size.width) {
                        log::debug!(
                            "Rebuilt board: {} columns at width {}",
                            grid.layout().columns,
                            grid.current_width()
                        );
                    }
                }
                Screen::Detail(detail) => detail.resize(state.viewport),
            }
        }
        Message::DragStarted(index) => {
            if let Screen::Grid(grid) = &mut state.screen {
                grid.start_drag(index);
            }
        }
        Message::Dragged(index, dx, dy) => {
            if let Screen::Grid(grid) = &mut state.screen {
                grid.drag(index, dx, dy);
            }
        }
        Message::DragEnded(index) => {
            if let Screen::Grid(grid) = &mut state.screen {
                grid.end_drag(index);
            }
        }
        Message::OpenDetail(index) => {
            let image = match &state.screen {
                Screen::Grid(grid) => grid.image(index).cloned(),
                Screen::Detail(_) => None,
            };
            if let Some(image) = image {
                state.router.push(Route::Detail(image));
                state.screen = open_screen(
                    state.router.current(),
                    state.source.as_ref(),
                    &state.config,
                    state.viewport,
                );
            }
        }
        Message::Back => {
            if state.router.back() {
                state.screen = open_screen(
                    state.router.current(),
                    state.source.as_ref(),
                    &state.config,
                    state.viewport,
                );
            }
        }
    }
    Task::none()
}

fn view(state: &Corkboard) -> Element<'_, Message> {
    match &state.screen {
        Screen::Grid(grid) => grid_view(grid),
        Screen::Detail(detail) => detail_view(detail),
    }
}

fn grid_view(grid: &GridView) -> Element<'_, Message> {
    let title = text("Images").size(30);

    if grid.tiles().is_empty() {
        let empty = text(format!("No images in {}", grid.images_dir().display()))
            .size(14)
            .color(LABEL_COLOR);
        return container(column![title, empty].spacing(20))
            .padding(20)
            .into();
    }

    let (canvas_width, canvas_height) = grid.canvas_size();
    let tiles = grid
        .tiles()
        .iter()
        .enumerate()
        .map(|(index, tile)| tile_view(index, tile));
    let canvas = Stack::with_children(tiles)
        .width(canvas_width)
        .height(canvas_height);

    scrollable(column![title, canvas].spacing(20).padding(20))
        .direction(scrollable::Direction::Both {
            vertical: scrollable::Scrollbar::default(),
            horizontal: scrollable::Scrollbar::default(),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn tile_view(index: usize, tile: &Tile) -> Element<'_, Message> {
    let picture = image(tile.image.path().to_string_lossy().to_string())
        .content_fit(iced::ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);

    let style: fn(&Theme) -> container::Style = if tile.is_dragging() {
        dragging_tile_style
    } else {
        tile_style
    };
    let card = container(picture)
        .width(tile.width)
        .height(tile.height)
        .style(style);

    let area = DragArea::new(card)
        .on_drag_start(Message::DragStarted(index))
        .on_drag(move |dx, dy| Message::Dragged(index, dx, dy))
        .on_drag_end(Message::DragEnded(index))
        .on_tap(Message::OpenDetail(index));

    container(area)
        .padding(Padding {
            top: tile.position.top,
            left: tile.position.left,
            right: 0.0,
            bottom: 0.0,
        })
        .into()
}

fn tile_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::WHITE)),
        ..Default::default()
    }
}

fn dragging_tile_style(theme: &Theme) -> container::Style {
    let palette = theme.palette();
    container::Style {
        background: Some(iced::Background::Color(Color::WHITE)),
        border: iced::Border {
            color: palette.primary,
            width: 2.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

fn detail_view(detail: &DetailView) -> Element<'_, Message> {
    let header = row![
        button("Back").on_press(Message::Back),
        text("Image details").size(20),
        text(detail.image().file_name()).size(14).color(LABEL_COLOR),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center);

    let info = match detail.info() {
        Ok(info) => info,
        Err(reason) => {
            return container(
                column![header, text(format!("Failed to load image: {}", reason))].spacing(20),
            )
            .padding(20)
            .into();
        }
    };

    let picture = image(detail.image().path().to_string_lossy().to_string())
        .content_fit(iced::ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);
    let card = container(info_card(info)).padding(10);

    let body: Element<'_, Message> = match detail.arrangement() {
        Arrangement::Stacked { image_height } => column![
            container(picture).width(Length::Fill).height(image_height),
            card,
        ]
        .into(),
        Arrangement::SideBySide { card_width } => row![
            container(picture).width(Length::Fill).height(Length::Fill),
            container(card).width(card_width),
        ]
        .height(Length::Fill)
        .into(),
    };

    container(column![header, body].spacing(20))
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn info_card(info: &FileInfo) -> Element<'_, Message> {
    let mut items: Vec<Element<'_, Message>> = vec![
        text("File info").size(16).into(),
        rule::horizontal(1).into(),
        info_field("Name", info.filename.clone()),
        info_field("Created", info.created_at.clone()),
        info_field("Modified", info.modified_at.clone()),
        info_field("Size", info.size_label.clone()),
    ];
    if let Some((w, h)) = info.dimensions {
        items.push(info_field("Dimensions", format!("{} x {} px", w, h)));
    }

    container(column(items).spacing(10).padding(20))
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn info_field(label: &str, value: String) -> Element<'_, Message> {
    row![
        text(label.to_string()).size(14).color(LABEL_COLOR).width(90),
        text(value).size(14),
    ]
    .spacing(8)
    .into()
}

fn theme(_state: &Corkboard) -> Theme {
    Theme::Dark
}
