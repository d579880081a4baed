mod fakes;
mod upload;
mod vote;
