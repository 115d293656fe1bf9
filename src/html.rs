use crate::composer::Scope;
use crate::tree::{Callback, Element, EventKind};

pub struct Div;
pub struct Heading;
pub struct Italic;
pub struct List;
pub struct ListItem;
pub struct Input;
pub struct Button;
pub struct Text;

pub trait Html {
    fn div<C>(&self, content: C)
    where
        C: FnOnce(Scope<Div>);

    fn h1<C>(&self, content: C)
    where
        C: FnOnce(Scope<Heading>);

    fn h2<C>(&self, content: C)
    where
        C: FnOnce(Scope<Heading>);

    fn h3<C>(&self, content: C)
    where
        C: FnOnce(Scope<Heading>);

    fn i<C>(&self, content: C)
    where
        C: FnOnce(Scope<Italic>);

    fn ul<C>(&self, content: C)
    where
        C: FnOnce(Scope<List>);

    fn li<C>(&self, content: C)
    where
        C: FnOnce(Scope<ListItem>);

    fn text<T>(&self, text: T)
    where
        T: Into<String>;

    /// Text field whose `value` is controlled by the caller.
    fn input<T>(&self, value: T, on_input: Option<Callback>)
    where
        T: Into<String>;

    fn button<T>(&self, label: T, on_click: Option<Callback>)
    where
        T: Into<String>;
}

impl<S> Html for Scope<S>
where
    S: 'static,
{
    fn div<C>(&self, content: C)
    where
        C: FnOnce(Scope<Div>),
    {
        self.create_node(Element::tag("div"), content);
    }

    fn h1<C>(&self, content: C)
    where
        C: FnOnce(Scope<Heading>),
    {
        self.create_node(Element::tag("h1"), content);
    }

    fn h2<C>(&self, content: C)
    where
        C: FnOnce(Scope<Heading>),
    {
        self.create_node(Element::tag("h2"), content);
    }

    fn h3<C>(&self, content: C)
    where
        C: FnOnce(Scope<Heading>),
    {
        self.create_node(Element::tag("h3"), content);
    }

    fn i<C>(&self, content: C)
    where
        C: FnOnce(Scope<Italic>),
    {
        self.create_node(Element::tag("i"), content);
    }

    fn ul<C>(&self, content: C)
    where
        C: FnOnce(Scope<List>),
    {
        self.create_node(Element::tag("ul"), content);
    }

    fn li<C>(&self, content: C)
    where
        C: FnOnce(Scope<ListItem>),
    {
        self.create_node(Element::tag("li"), content);
    }

    fn text<T>(&self, text: T)
    where
        T: Into<String>,
    {
        self.create_node::<Text, _>(Element::text(text), |_| {});
    }

    fn input<T>(&self, value: T, on_input: Option<Callback>)
    where
        T: Into<String>,
    {
        let value = value.into();
        self.create_node::<Input, _>(Element::tag("input"), move |s| {
            s.set_attr("type", "text");
            s.set_attr("value", value);
            if let Some(callback) = on_input {
                s.on(EventKind::Input, callback);
            }
        });
    }

    fn button<T>(&self, label: T, on_click: Option<Callback>)
    where
        T: Into<String>,
    {
        let label = label.into();
        self.create_node::<Button, _>(Element::tag("button"), move |s| {
            s.text(label);
            if let Some(callback) = on_click {
                s.on(EventKind::Click, callback);
            }
        });
    }
}
