mod panels;
mod status;
