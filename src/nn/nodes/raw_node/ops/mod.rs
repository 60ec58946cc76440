mod add;
mod clamp_max;
mod divide;
mod min_all;
mod multiply;
mod power;
mod subtract;
mod sum_axis;

pub(in crate::nn) use add::Add;
pub(in crate::nn) use clamp_max::ClampMax;
pub(in crate::nn) use divide::Divide;
pub(in crate::nn) use min_all::MinAll;
pub(in crate::nn) use multiply::Multiply;
pub(in crate::nn) use power::Power;
pub(in crate::nn) use subtract::Subtract;
pub(in crate::nn) use sum_axis::SumAxis;
