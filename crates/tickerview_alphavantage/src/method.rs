use serde::Serialize;

pub trait Method {
    const PATH: &'static str;
    /// Value of the `function` query parameter selecting the endpoint.
    const FUNCTION: &'static str;

    type Params: Serialize;
}
