

#[cfg(test)]
mod align;

#[cfg(test)]
mod wrap;

#[cfg(test)]
mod color;



#[cfg(test)]
mod signature;
