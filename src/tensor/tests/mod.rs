mod math;
mod new;
mod reduce;
