//! A wrapper widget that turns pointer input over its content into drag and
//! tap messages.
//!
//! A press that is released before the pointer travels `DRAG_THRESHOLD` is a
//! tap. Past the threshold it becomes a drag: one start message, then one
//! message per cursor move carrying the delta since the previous move, then
//! an end message on release. Mouse and single-finger touch behave the same.

use iced::advanced::layout;
use iced::advanced::overlay;
use iced::advanced::renderer;
use iced::advanced::widget::tree::Tag;
use iced::advanced::widget::{Operation, Tree};
use iced::advanced::{Clipboard, Layout, Shell, Widget};
use iced::{mouse, touch, Element, Event, Length, Point, Rectangle, Size, Vector};

const DRAG_THRESHOLD: f32 = 5.0;

#[derive(Debug, Default)]
struct State {
    /// Button or finger is down on the content.
    pressed: bool,
    press_pos: Option<Point>,
    /// Finger that started the press, when it came from touch.
    finger: Option<touch::Finger>,
    dragging: bool,
    last_pos: Option<Point>,
}

impl State {
    fn reset(&mut self) {
        *self = State::default();
    }
}

pub struct DragArea<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer> {
    content: Element<'a, Message, Theme, Renderer>,
    on_drag_start: Option<Message>,
    on_drag: Option<Box<dyn Fn(f32, f32) -> Message + 'a>>,
    on_drag_end: Option<Message>,
    on_tap: Option<Message>,
}

impl<'a, Message, Theme, Renderer> DragArea<'a, Message, Theme, Renderer> {
    pub fn new(content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        Self {
            content: content.into(),
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
            on_tap: None,
        }
    }

    pub fn on_drag_start(mut self, message: Message) -> Self {
        self.on_drag_start = Some(message);
        self
    }

    /// Called with (dx, dy) since the previous drag message.
    pub fn on_drag(mut self, f: impl Fn(f32, f32) -> Message + 'a) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }

    pub fn on_drag_end(mut self, message: Message) -> Self {
        self.on_drag_end = Some(message);
        self
    }

    pub fn on_tap(mut self, message: Message) -> Self {
        self.on_tap = Some(message);
        self
    }
}

impl<Message: Clone, Theme, Renderer> DragArea<'_, Message, Theme, Renderer> {
    fn press(&self, state: &mut State, pos: Point, finger: Option<touch::Finger>) {
        state.pressed = true;
        state.press_pos = Some(pos);
        state.finger = finger;
        state.dragging = false;
        state.last_pos = Some(pos);
    }

    fn moved(&self, state: &mut State, pos: Point, shell: &mut Shell<'_, Message>) {
        let (Some(press), Some(last)) = (state.press_pos, state.last_pos) else {
            return;
        };
        if !state.dragging {
            if distance(press, pos) <= DRAG_THRESHOLD {
                return;
            }
            state.dragging = true;
            if let Some(message) = &self.on_drag_start {
                shell.publish(message.clone());
            }
        }
        let dx = pos.x - last.x;
        let dy = pos.y - last.y;
        if dx.abs() > 0.5 || dy.abs() > 0.5 {
            state.last_pos = Some(pos);
            if let Some(on_drag) = &self.on_drag {
                shell.publish(on_drag(dx, dy));
            }
        }
    }

    fn release(&self, state: &mut State, over_content: bool, shell: &mut Shell<'_, Message>) {
        let message = if state.dragging {
            self.on_drag_end.clone()
        } else if over_content {
            self.on_tap.clone()
        } else {
            None
        };
        if let Some(message) = message {
            shell.publish(message);
        }
        state.reset();
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for DragArea<'_, Message, Theme, Renderer>
where
    Message: Clone,
    Renderer: iced::advanced::Renderer,
{
    fn tag(&self) -> Tag {
        Tag::of::<State>()
    }

    fn state(&self) -> iced::advanced::widget::tree::State {
        iced::advanced::widget::tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget_mut()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn operate(
        &mut self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        self.content
            .as_widget_mut()
            .operate(&mut tree.children[0], layout, renderer, operation);
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();
        let bounds = layout.bounds();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(pos) = cursor.position_over(bounds) {
                    self.press(state, pos, None);
                    shell.capture_event();
                    return;
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                // A pressed tile owns the pointer even when a layer above it
                // has levitated the cursor.
                if state.pressed && state.finger.is_none() {
                    if let Some(pos) = cursor.land().position() {
                        self.moved(state, pos, shell);
                        if state.dragging {
                            shell.capture_event();
                            return;
                        }
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.pressed && state.finger.is_none() {
                    self.release(state, cursor.land().is_over(bounds), shell);
                    shell.capture_event();
                    return;
                }
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !state.pressed && bounds.contains(*position) {
                    self.press(state, *position, Some(*id));
                    shell.capture_event();
                    return;
                }
            }
            Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if state.finger == Some(*id) {
                    self.moved(state, *position, shell);
                    shell.capture_event();
                    return;
                }
            }
            Event::Touch(
                touch::Event::FingerLifted { id, position }
                | touch::Event::FingerLost { id, position },
            ) => {
                if state.finger == Some(*id) {
                    self.release(state, bounds.contains(*position), shell);
                    shell.capture_event();
                    return;
                }
            }
            _ => {}
        }

        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            style,
            layout,
            cursor,
            viewport,
        );
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();
        if state.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::None
        }
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        self.content.as_widget_mut().overlay(
            &mut tree.children[0],
            layout,
            renderer,
            viewport,
            translation,
        )
    }
}

fn distance(a: Point, b: Point) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

impl<'a, Message, Theme, Renderer> From<DragArea<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Theme: 'a,
    Renderer: iced::advanced::Renderer + 'a,
{
    fn from(area: DragArea<'a, Message, Theme, Renderer>) -> Self {
        Element::new(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::advanced::clipboard;
    use iced::widget::{container, Space, Stack};
    use iced::{Padding, Theme};

    #[derive(Debug, Clone, PartialEq)]
    enum Gesture {
        Start(usize),
        Drag(usize, f32, f32),
        End(usize),
        Tap(usize),
    }

    fn tile<'a>(index: usize) -> DragArea<'a, Gesture, Theme, ()> {
        DragArea::new(Space::new().width(100.0).height(100.0))
            .on_drag_start(Gesture::Start(index))
            .on_drag(move |dx, dy| Gesture::Drag(index, dx, dy))
            .on_drag_end(Gesture::End(index))
            .on_tap(Gesture::Tap(index))
    }

    /// Drives an element headlessly with the null renderer.
    struct Harness<'a> {
        element: Element<'a, Gesture, Theme, ()>,
        tree: Tree,
        node: layout::Node,
    }

    impl<'a> Harness<'a> {
        fn new(element: impl Into<Element<'a, Gesture, Theme, ()>>) -> Self {
            let mut element = element.into();
            let mut tree = Tree::new(&element);
            let limits = layout::Limits::new(Size::ZERO, Size::new(1000.0, 1000.0));
            let node = element.as_widget_mut().layout(&mut tree, &(), &limits);
            Self {
                element,
                tree,
                node,
            }
        }

        fn send(&mut self, event: Event, cursor: mouse::Cursor) -> Vec<Gesture> {
            let mut messages = Vec::new();
            let viewport = Rectangle::new(Point::ORIGIN, Size::new(1000.0, 1000.0));
            {
                let mut shell = Shell::new(&mut messages);
                self.element.as_widget_mut().update(
                    &mut self.tree,
                    &event,
                    Layout::new(&self.node),
                    cursor,
                    &(),
                    &mut clipboard::Null,
                    &mut shell,
                    &viewport,
                );
            }
            messages
        }

        fn press(&mut self, x: f32, y: f32) -> Vec<Gesture> {
            self.send(
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
                mouse::Cursor::Available(Point::new(x, y)),
            )
        }

        fn move_to(&mut self, x: f32, y: f32) -> Vec<Gesture> {
            let position = Point::new(x, y);
            self.send(
                Event::Mouse(mouse::Event::CursorMoved { position }),
                mouse::Cursor::Available(position),
            )
        }

        fn release(&mut self, x: f32, y: f32) -> Vec<Gesture> {
            self.send(
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
                mouse::Cursor::Available(Point::new(x, y)),
            )
        }

        fn finger(&mut self, event: touch::Event) -> Vec<Gesture> {
            self.send(Event::Touch(event), mouse::Cursor::Unavailable)
        }
    }

    #[test]
    fn short_press_is_a_tap() {
        let mut h = Harness::new(tile(0));
        assert!(h.press(10.0, 10.0).is_empty());
        assert!(h.move_to(13.0, 12.0).is_empty());
        assert_eq!(h.release(13.0, 12.0), vec![Gesture::Tap(0)]);
    }

    #[test]
    fn release_outside_without_drag_is_not_a_tap() {
        let mut h = Harness::new(tile(0));
        h.press(10.0, 10.0);
        assert!(h.release(500.0, 500.0).is_empty());
    }

    #[test]
    fn crossing_threshold_starts_a_drag_with_per_frame_deltas() {
        let mut h = Harness::new(tile(3));
        h.press(10.0, 10.0);
        assert!(h.move_to(12.0, 10.0).is_empty());
        // The first delta is measured from the press point.
        assert_eq!(
            h.move_to(30.0, 10.0),
            vec![Gesture::Start(3), Gesture::Drag(3, 20.0, 0.0)]
        );
        assert_eq!(h.move_to(35.0, 12.0), vec![Gesture::Drag(3, 5.0, 2.0)]);
        assert_eq!(h.move_to(25.0, 2.0), vec![Gesture::Drag(3, -10.0, -10.0)]);
    }

    #[test]
    fn release_after_drag_ends_it_without_a_tap() {
        let mut h = Harness::new(tile(1));
        h.press(10.0, 10.0);
        h.move_to(40.0, 40.0);
        assert_eq!(h.release(40.0, 40.0), vec![Gesture::End(1)]);

        // The next press starts from scratch.
        h.press(10.0, 10.0);
        assert_eq!(h.release(10.0, 10.0), vec![Gesture::Tap(1)]);
    }

    #[test]
    fn moves_without_a_press_are_ignored() {
        let mut h = Harness::new(tile(0));
        assert!(h.move_to(10.0, 10.0).is_empty());
        assert!(h.move_to(60.0, 60.0).is_empty());
        assert!(h.release(60.0, 60.0).is_empty());
    }

    #[test]
    fn other_fingers_are_ignored() {
        let first = touch::Finger(1);
        let second = touch::Finger(2);
        let mut h = Harness::new(tile(0));

        h.finger(touch::Event::FingerPressed {
            id: first,
            position: Point::new(10.0, 10.0),
        });
        assert!(h
            .finger(touch::Event::FingerPressed {
                id: second,
                position: Point::new(20.0, 20.0),
            })
            .is_empty());
        assert!(h
            .finger(touch::Event::FingerMoved {
                id: second,
                position: Point::new(80.0, 80.0),
            })
            .is_empty());
        assert!(h
            .finger(touch::Event::FingerLifted {
                id: second,
                position: Point::new(80.0, 80.0),
            })
            .is_empty());

        assert_eq!(
            h.finger(touch::Event::FingerMoved {
                id: first,
                position: Point::new(40.0, 10.0),
            }),
            vec![Gesture::Start(0), Gesture::Drag(0, 30.0, 0.0)]
        );
        assert_eq!(
            h.finger(touch::Event::FingerLifted {
                id: first,
                position: Point::new(40.0, 10.0),
            }),
            vec![Gesture::End(0)]
        );
    }

    #[test]
    fn levitated_cursor_still_drives_a_pressed_tile() {
        let mut h = Harness::new(tile(0));
        h.press(10.0, 10.0);
        h.move_to(30.0, 10.0);

        let position = Point::new(50.0, 10.0);
        let moved = h.send(
            Event::Mouse(mouse::Event::CursorMoved { position }),
            mouse::Cursor::Levitating(position),
        );
        assert_eq!(moved, vec![Gesture::Drag(0, 20.0, 0.0)]);

        let released = h.send(
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
            mouse::Cursor::Levitating(position),
        );
        assert_eq!(released, vec![Gesture::End(0)]);
    }

    #[test]
    fn drag_keeps_flowing_over_a_tile_stacked_above() {
        let placed = |index: usize, left: f32| -> Element<'static, Gesture, Theme, ()> {
            container(tile(index))
                .padding(Padding {
                    left,
                    ..Padding::ZERO
                })
                .into()
        };
        let board = Stack::with_children(vec![placed(0, 0.0), placed(1, 200.0)])
            .width(1000.0)
            .height(1000.0);
        let mut h = Harness::new(board);

        h.press(10.0, 10.0);
        assert_eq!(
            h.move_to(100.0, 10.0),
            vec![Gesture::Start(0), Gesture::Drag(0, 90.0, 0.0)]
        );
        assert_eq!(h.move_to(250.0, 10.0), vec![Gesture::Drag(0, 150.0, 0.0)]);
        assert_eq!(h.move_to(280.0, 10.0), vec![Gesture::Drag(0, 30.0, 0.0)]);
        assert_eq!(h.release(280.0, 10.0), vec![Gesture::End(0)]);
    }
}
